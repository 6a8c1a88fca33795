use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Request body for POST /predict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub tickers: Vec<String>,
}

/// Response from POST /predict, positionally aligned with the request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub results: Vec<PredictionResult>,
}

/// One scored prediction for a single ticker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub final_score: f64,
    pub rule_score: f64,
    pub ml_score: Option<f64>,
    pub explanation: Vec<String>,
    #[serde(default)]
    pub events: Vec<NewsEvent>,
}

/// A scored news event attached to a prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsEvent {
    pub headline: String,
    pub sentiment: f64,
}

/// Response from GET /predict_one/{ticker}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphData {
    pub trends: TrendSeries,
    pub features: FeatureImportance,
    pub sentiment: SentimentBreakdown,
}

/// Score trend series, one value per snapshot interval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSeries {
    // `final` is a reserved word in Rust
    #[serde(rename = "final")]
    pub final_: Vec<f64>,
    pub rule: Vec<f64>,
    pub ml: Vec<f64>,
}

/// Named feature importances for the bar chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub names: Vec<String>,
    pub values: Vec<f64>,
}

/// Positive/neutral/negative event counts for the pie chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentBreakdown {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

/// One entry of the GET /latest map (ticker -> snapshot)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub rule_score: f64,
    pub ml_score: Option<f64>,
    pub final_score: f64,
    #[serde(default)]
    pub explanation: Vec<String>,
    pub timestamp: NaiveDateTime,
}

/// Map returned by GET /latest
pub type LatestScores = HashMap<String, ScoreSnapshot>;

/// One row of GET /history/{ticker}, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub ticker: String,
    pub rule_score: f64,
    pub ml_score: Option<f64>,
    pub final_score: f64,
    #[serde(default)]
    pub explanation: Vec<String>,
    pub timestamp: NaiveDateTime,
}

/// Error payload the backend returns alongside non-OK statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}

/// Comprehensive error type for backend API operations
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 400 Bad Request, message extracted from the error payload when present
    BadRequest(String),
    /// 404 Not Found
    NotFound(String),
    /// 5xx Server Error
    ServerError(i32, String),
    /// Other HTTP errors
    HttpError(i32, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => {
                write!(f, "Deserialization Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_result_decodes_null_ml_score() {
        let json = r#"{
            "final_score": 0.8,
            "rule_score": 2.0,
            "ml_score": null,
            "explanation": ["Momentum positive", "Volume above average"]
        }"#;

        let result: PredictionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.final_score, 0.8);
        assert!(result.ml_score.is_none());
        assert_eq!(result.explanation.len(), 2);
        // absent events field defaults to empty
        assert!(result.events.is_empty());
    }

    #[test]
    fn test_graph_data_decodes() {
        let json = r#"{
            "trends": {"final": [0.1, 0.2], "rule": [1.0, 2.0], "ml": [0.5, 0.6]},
            "features": {"names": ["momentum", "volume"], "values": [0.7, 0.3]},
            "sentiment": {"positive": 4, "neutral": 2, "negative": 1}
        }"#;

        let data: GraphData = serde_json::from_str(json).unwrap();
        assert_eq!(data.trends.final_, vec![0.1, 0.2]);
        assert_eq!(data.features.names.len(), data.features.values.len());
        assert_eq!(data.sentiment.positive, 4.0);
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::ServerError(500, "model not loaded".to_string());
        assert_eq!(err.to_string(), "Server Error (500): model not loaded");

        let err = ApiError::BadRequest("Please provide at least one ticker symbol".to_string());
        assert!(err.to_string().starts_with("Bad Request:"));
    }
}
