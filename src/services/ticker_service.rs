use crate::error::AppError;

/// Split raw comma-separated user input into an ordered ticker list
///
/// The whole input is trimmed first; an empty input is rejected before any
/// request is issued. Each segment is trimmed but otherwise untouched: case
/// is preserved (uppercasing happens at display time), segments are not
/// de-duplicated, and no symbol format validation is applied.
pub fn parse_tickers(raw: &str) -> Result<Vec<String>, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::EmptyInput);
    }

    Ok(trimmed.split(',').map(|t| t.trim().to_string()).collect())
}

/// Resolve the display symbol for a result by its position in the request
///
/// Results are positionally aligned with the requested tickers; an index
/// with no matching ticker is reported as "UNKNOWN".
pub fn display_symbol(tickers: &[String], index: usize) -> String {
    match tickers.get(index) {
        Some(t) if !t.is_empty() => t.to_uppercase(),
        _ => "UNKNOWN".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order_and_case() {
        let tickers = parse_tickers(" tsla, AAPL ,msft").unwrap();
        assert_eq!(tickers, vec!["tsla", "AAPL", "msft"]);
    }

    #[test]
    fn test_parse_keeps_every_segment() {
        // no de-duplication, empty segments kept
        let tickers = parse_tickers("TSLA,,TSLA").unwrap();
        assert_eq!(tickers.len(), 3);
        assert_eq!(tickers[1], "");
    }

    #[test]
    fn test_parse_rejects_blank_input() {
        assert!(matches!(parse_tickers("   "), Err(AppError::EmptyInput)));
        assert!(matches!(parse_tickers(""), Err(AppError::EmptyInput)));
    }

    #[test]
    fn test_display_symbol_uppercases() {
        let tickers = vec!["tsla".to_string(), "AAPL".to_string()];
        assert_eq!(display_symbol(&tickers, 0), "TSLA");
        assert_eq!(display_symbol(&tickers, 1), "AAPL");
    }

    #[test]
    fn test_display_symbol_out_of_range_is_unknown() {
        let tickers = vec!["TSLA".to_string()];
        assert_eq!(display_symbol(&tickers, 5), "UNKNOWN");
        assert_eq!(display_symbol(&[String::new()], 0), "UNKNOWN");
    }
}
