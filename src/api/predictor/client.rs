use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::warn;

use super::models::{
    ApiError, ErrorResponse, GraphData, HistoryRecord, LatestScores, PredictRequest,
    PredictResponse,
};

/// HTTP client for the prediction backend
pub struct PredictorClient {
    http_client: HttpClient,
    base_url: String,
}

impl PredictorClient {
    /// Create a new client against the given backend base URL
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        // The backend reports failures as {"error": "..."} JSON bodies
        let message = serde_json::from_str::<ErrorResponse>(&body_text)
            .ok()
            .and_then(|e| e.error.or(e.message))
            .unwrap_or_else(|| body_text.clone());

        match status_code {
            400 => ApiError::BadRequest(message),
            404 => ApiError::NotFound(message),
            500..=599 => {
                warn!("Server error {}: {}", status_code, message);
                ApiError::ServerError(status_code as i32, message)
            }
            _ => ApiError::HttpError(status_code as i32, message),
        }
    }

    /// POST /predict
    ///
    /// Scores a batch of tickers. The returned results are positionally
    /// aligned with the request's ticker order; no matching key is used.
    pub async fn predict(&self, tickers: Vec<String>) -> Result<PredictResponse, ApiError> {
        let url = format!("{}/predict", self.base_url);
        let body = PredictRequest { tickers };

        let response = self
            .http_client
            .post(&url)
            .headers(Self::create_headers())
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<PredictResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /predict_one/{ticker}
    ///
    /// Fetches the graph view data (score trends, feature importances,
    /// sentiment distribution) for a single ticker.
    pub async fn predict_one(&self, ticker: &str) -> Result<GraphData, ApiError> {
        let url = format!("{}/predict_one/{}", self.base_url, ticker);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<GraphData>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /latest
    ///
    /// Returns the most recent scheduler snapshot per tracked ticker.
    pub async fn latest(&self) -> Result<LatestScores, ApiError> {
        let url = format!("{}/latest", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<LatestScores>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /history/{ticker}
    ///
    /// Returns up to the 10 most recent score records, newest first.
    pub async fn history(&self, ticker: &str) -> Result<Vec<HistoryRecord>, ApiError> {
        let url = format!("{}/history/{}", self.base_url, ticker);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<Vec<HistoryRecord>>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}
