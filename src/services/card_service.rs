use crate::api::predictor::models::{NewsEvent, PredictionResult};
use crate::models::{EventSummary, ScoreCard, SentimentIcon};
use crate::services::company_service::CompanyDirectory;
use crate::services::ticker_service;

/// Maximum headline characters shown on a card before truncation
const HEADLINE_PREVIEW_CHARS: usize = 60;

/// Marker shown when the ML model produced no score
const ML_SCORE_UNAVAILABLE: &str = "N/A";

/// Classify an event's sentiment into a display icon
///
/// Boundary values of exactly 0.2 and -0.2 stay neutral.
pub fn sentiment_icon(sentiment: f64) -> SentimentIcon {
    if sentiment > 0.2 {
        SentimentIcon::Rising
    } else if sentiment < -0.2 {
        SentimentIcon::Warning
    } else {
        SentimentIcon::News
    }
}

/// Summarize one news event for card display
///
/// Headlines longer than the preview length are cut and marked with an
/// ellipsis; the full headline is kept on the summary for detail display.
pub fn summarize_event(event: &NewsEvent) -> EventSummary {
    let preview = if event.headline.chars().count() > HEADLINE_PREVIEW_CHARS {
        let mut cut: String = event.headline.chars().take(HEADLINE_PREVIEW_CHARS).collect();
        cut.push('…');
        cut
    } else {
        event.headline.clone()
    };

    EventSummary {
        icon: sentiment_icon(event.sentiment),
        preview,
        headline: event.headline.clone(),
        sentiment: event.sentiment,
    }
}

/// Build the card for one prediction result
///
/// The ticker is resolved positionally against the original request order;
/// scores are carried over as received, without validation or clamping.
pub fn build_card(
    index: usize,
    result: &PredictionResult,
    tickers: &[String],
    directory: &CompanyDirectory,
) -> ScoreCard {
    let ticker = ticker_service::display_symbol(tickers, index);
    let company = directory.resolve(&ticker);

    ScoreCard {
        ticker,
        company,
        final_score: result.final_score,
        rule_score: result.rule_score,
        ml_score: result.ml_score,
        explanation: result.explanation.clone(),
        events: result.events.iter().map(summarize_event).collect(),
    }
}

/// Render a card as a text block
///
/// Sections appear in fixed order: header, scores, explanation, events
/// (omitted entirely when empty), graph hint.
pub fn render_card(card: &ScoreCard) -> String {
    let mut out = String::new();

    out.push_str(&format!("🏢 {} ({})\n", card.company.name, card.ticker));
    out.push_str(&format!("   {}\n", card.company.logo));
    out.push_str(&format!("Final Score: {}\n", card.final_score));
    out.push_str(&format!("Rule Score: {}\n", card.rule_score));
    match card.ml_score {
        Some(score) => out.push_str(&format!("ML Score: {}\n", score)),
        None => out.push_str(&format!("ML Score: {}\n", ML_SCORE_UNAVAILABLE)),
    }

    out.push_str("Explanation:\n");
    for line in &card.explanation {
        out.push_str(&format!("  • {}\n", line));
    }

    if !card.events.is_empty() {
        out.push_str("Events:\n");
        for event in &card.events {
            out.push_str(&format!(
                "  {} {} ({})\n",
                event.icon.symbol(),
                event.preview,
                event.sentiment
            ));
        }
    }

    out.push_str(&format!("📊 Graphs: `graphs {}`\n", card.ticker));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(headline: &str, sentiment: f64) -> NewsEvent {
        NewsEvent {
            headline: headline.to_string(),
            sentiment,
        }
    }

    fn result_with(ml_score: Option<f64>, events: Vec<NewsEvent>) -> PredictionResult {
        PredictionResult {
            final_score: 0.8,
            rule_score: 2.0,
            ml_score,
            explanation: vec!["Momentum positive".to_string()],
            events,
        }
    }

    #[test]
    fn test_icon_thresholds_are_strict() {
        assert_eq!(sentiment_icon(0.2), SentimentIcon::News);
        assert_eq!(sentiment_icon(0.2001), SentimentIcon::Rising);
        assert_eq!(sentiment_icon(-0.2), SentimentIcon::News);
        assert_eq!(sentiment_icon(-0.25), SentimentIcon::Warning);
        assert_eq!(sentiment_icon(0.0), SentimentIcon::News);
    }

    #[test]
    fn test_headline_truncation_boundary() {
        let at_limit = "x".repeat(60);
        let summary = summarize_event(&event(&at_limit, 0.0));
        assert_eq!(summary.preview, at_limit);

        let over_limit = "x".repeat(61);
        let summary = summarize_event(&event(&over_limit, 0.0));
        assert_eq!(summary.preview.chars().count(), 61);
        assert!(summary.preview.ends_with('…'));
        assert_eq!(&summary.preview[..60], "x".repeat(60));
        // full headline survives for detail display
        assert_eq!(summary.headline, over_limit);
    }

    #[test]
    fn test_build_card_resolves_ticker_positionally() {
        let directory = CompanyDirectory::builtin();
        let tickers = vec!["tsla".to_string(), "AAPL".to_string()];

        let card = build_card(0, &result_with(None, vec![]), &tickers, &directory);
        assert_eq!(card.ticker, "TSLA");
        assert_eq!(card.company.name, "Tesla");

        let card = build_card(1, &result_with(None, vec![]), &tickers, &directory);
        assert_eq!(card.company.name, "Apple");

        // index past the request falls back to UNKNOWN
        let card = build_card(2, &result_with(None, vec![]), &tickers, &directory);
        assert_eq!(card.ticker, "UNKNOWN");
        assert_eq!(card.company.name, "UNKNOWN");
    }

    #[test]
    fn test_render_marks_missing_ml_score() {
        let directory = CompanyDirectory::builtin();
        let tickers = vec!["TSLA".to_string()];
        let card = build_card(0, &result_with(None, vec![]), &tickers, &directory);

        let text = render_card(&card);
        assert!(text.contains("ML Score: N/A"));
        assert!(!text.contains("ML Score: 0\n"));
    }

    #[test]
    fn test_render_omits_empty_events_section() {
        let directory = CompanyDirectory::builtin();
        let tickers = vec!["TSLA".to_string()];

        let card = build_card(0, &result_with(Some(0.5), vec![]), &tickers, &directory);
        assert!(!render_card(&card).contains("Events:"));

        let card = build_card(
            0,
            &result_with(Some(0.5), vec![event("Deliveries beat estimates", 0.6)]),
            &tickers,
            &directory,
        );
        let text = render_card(&card);
        assert!(text.contains("Events:"));
        assert!(text.contains("📈 Deliveries beat estimates (0.6)"));
    }
}
