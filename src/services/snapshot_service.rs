use crate::api::predictor::models::{HistoryRecord, LatestScores};
use crate::utils::Table;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

fn format_ml(ml_score: Option<f64>) -> String {
    match ml_score {
        Some(score) => format!("{}", score),
        None => "N/A".to_string(),
    }
}

/// Format the /latest snapshot map as a table
///
/// Rows are sorted by ticker so repeated calls render identically.
pub fn format_latest(scores: &LatestScores) -> String {
    if scores.is_empty() {
        return "No snapshots recorded yet.".to_string();
    }

    let mut tickers: Vec<&String> = scores.keys().collect();
    tickers.sort();

    let mut table = Table::new(vec!["Ticker", "Rule", "ML", "Final", "Updated"]);
    for ticker in tickers {
        let snapshot = &scores[ticker];
        table.add_row(vec![
            ticker.to_uppercase(),
            format!("{}", snapshot.rule_score),
            format_ml(snapshot.ml_score),
            format!("{}", snapshot.final_score),
            snapshot.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        ]);
    }

    table.render()
}

/// Format a ticker's score history as a table, preserving server order
pub fn format_history(ticker: &str, records: &[HistoryRecord]) -> String {
    if records.is_empty() {
        return format!("No history for {} yet.", ticker);
    }

    let mut table = Table::new(vec!["When", "Rule", "ML", "Final"]);
    for record in records {
        table.add_row(vec![
            record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            format!("{}", record.rule_score),
            format_ml(record.ml_score),
            format!("{}", record.final_score),
        ]);
    }

    format!("📜 {} - last {} score(s)\n{}", ticker, records.len(), table.render())
}
