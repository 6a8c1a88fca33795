//! Result card view models

use crate::models::company::CompanyMeta;

/// Icon classifying an event's sentiment polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentIcon {
    Rising,
    Warning,
    News,
}

impl SentimentIcon {
    pub fn symbol(&self) -> &'static str {
        match self {
            SentimentIcon::Rising => "📈",
            SentimentIcon::Warning => "⚠️",
            SentimentIcon::News => "📰",
        }
    }
}

/// One summarized news event line on a card
#[derive(Debug, Clone)]
pub struct EventSummary {
    pub icon: SentimentIcon,
    /// Headline cut to the preview length, with ellipsis when shortened
    pub preview: String,
    /// Full headline, kept for detail display
    pub headline: String,
    pub sentiment: f64,
}

/// One rendered prediction result for a single ticker
#[derive(Debug, Clone)]
pub struct ScoreCard {
    /// Display symbol, always uppercase ("UNKNOWN" when unresolvable)
    pub ticker: String,
    pub company: CompanyMeta,
    pub final_score: f64,
    pub rule_score: f64,
    pub ml_score: Option<f64>,
    pub explanation: Vec<String>,
    pub events: Vec<EventSummary>,
}
