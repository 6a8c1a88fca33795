use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::api::predictor::models::{ApiError, PredictResponse};
use crate::api::predictor::PredictorClient;
use crate::error::AppError;
use crate::models::ScoreCard;
use crate::services::card_service;
use crate::services::company_service::CompanyDirectory;
use crate::services::ticker_service;

/// Source of batch prediction scores
///
/// Seam between the pipeline and the HTTP client so tests can run against
/// a canned provider.
#[async_trait]
pub trait ScoreProvider: Send + Sync {
    async fn fetch_predictions(&self, tickers: Vec<String>) -> Result<PredictResponse, ApiError>;
}

#[async_trait]
impl ScoreProvider for PredictorClient {
    async fn fetch_predictions(&self, tickers: Vec<String>) -> Result<PredictResponse, ApiError> {
        self.predict(tickers).await
    }
}

/// Pipeline lifecycle, observable for diagnostics and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    AwaitingResponse,
    Rendering,
}

/// Owned container for the rendered cards
///
/// Replaced wholesale (cleared, then rebuilt) on each successful response;
/// failures leave the previous contents in place.
#[derive(Debug, Default)]
pub struct CardBoard {
    cards: Vec<ScoreCard>,
}

impl CardBoard {
    fn replace(&mut self, cards: Vec<ScoreCard>) {
        self.cards.clear();
        self.cards.extend(cards);
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for card in &self.cards {
            out.push_str(&card_service::render_card(card));
            out.push('\n');
        }
        out
    }
}

/// Orchestrates ticker parsing, the batch fetch, and card board replacement
pub struct RenderPipeline {
    provider: Arc<dyn ScoreProvider>,
    directory: CompanyDirectory,
    board: Mutex<CardBoard>,
    state: Mutex<PipelineState>,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl RenderPipeline {
    pub fn new(provider: Arc<dyn ScoreProvider>, directory: CompanyDirectory) -> Self {
        Self {
            provider,
            directory,
            board: Mutex::new(CardBoard::default()),
            state: Mutex::new(PipelineState::Idle),
            in_flight: Mutex::new(None),
        }
    }

    pub fn state(&self) -> PipelineState {
        *self.state.lock().unwrap()
    }

    fn set_state(&self, state: PipelineState) {
        *self.state.lock().unwrap() = state;
    }

    /// Current cards, in render order
    pub fn cards(&self) -> Vec<ScoreCard> {
        self.board.lock().unwrap().cards.clone()
    }

    /// Write the rendered board to the given output handle
    pub fn render_to(&self, out: &mut dyn Write) -> std::io::Result<()> {
        let rendered = self.board.lock().unwrap().render();
        out.write_all(rendered.as_bytes())
    }

    /// Score the given raw ticker input and rebuild the card board
    ///
    /// The fetch runs as an abortable task; a newer submission supersedes
    /// any fetch still in flight, which then reports `AppError::Superseded`.
    /// On any failure the board keeps its previous contents. Returns the
    /// number of cards rendered.
    pub async fn submit(&self, raw_input: &str) -> Result<usize, AppError> {
        let tickers = ticker_service::parse_tickers(raw_input)?;
        debug!("Submitting {} ticker(s): {:?}", tickers.len(), tickers);

        self.set_state(PipelineState::AwaitingResponse);

        let provider = Arc::clone(&self.provider);
        let request = tickers.clone();
        let task = tokio::spawn(async move { provider.fetch_predictions(request).await });

        // a newer submission replaces and aborts whatever was in flight
        {
            let mut slot = self.in_flight.lock().unwrap();
            if let Some(previous) = slot.replace(task.abort_handle()) {
                warn!("Superseding an in-flight prediction fetch");
                previous.abort();
            }
        }

        let response = match task.await {
            Ok(Ok(response)) => response,
            Ok(Err(api_err)) => {
                self.set_state(PipelineState::Idle);
                return Err(api_err.into());
            }
            Err(join_err) if join_err.is_cancelled() => {
                // the superseding submission owns the pipeline state now
                return Err(AppError::Superseded);
            }
            Err(join_err) => {
                self.set_state(PipelineState::Idle);
                return Err(ApiError::RequestError(join_err.to_string()).into());
            }
        };

        if response.results.len() != tickers.len() {
            self.set_state(PipelineState::Idle);
            return Err(AppError::MismatchedResults {
                requested: tickers.len(),
                returned: response.results.len(),
            });
        }

        self.set_state(PipelineState::Rendering);

        let cards: Vec<ScoreCard> = response
            .results
            .iter()
            .enumerate()
            .map(|(index, result)| {
                card_service::build_card(index, result, &tickers, &self.directory)
            })
            .collect();

        let count = cards.len();
        self.board.lock().unwrap().replace(cards);
        self.set_state(PipelineState::Idle);
        info!("Rendered {} card(s)", count);

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::api::predictor::models::PredictionResult;

    /// Per-call behavior for the scripted provider
    enum Behavior {
        /// Respond with one result per requested ticker
        Ok,
        /// Respond with a fixed result count, ignoring the request
        Count(usize),
        /// Fail with a transport error
        Fail,
        /// Sleep before responding normally
        Slow(Duration),
    }

    /// Counts calls and replays a script of behaviors (then answers `Ok`)
    struct MockProvider {
        calls: AtomicUsize,
        script: Mutex<Vec<Behavior>>,
    }

    impl MockProvider {
        fn scripted(script: Vec<Behavior>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                script: Mutex::new(script),
            }
        }

        fn well_behaved() -> Self {
            Self::scripted(vec![])
        }
    }

    fn make_result(index: usize) -> PredictionResult {
        PredictionResult {
            final_score: 0.1 * index as f64,
            rule_score: index as f64,
            ml_score: None,
            explanation: vec![format!("result {}", index)],
            events: vec![],
        }
    }

    #[async_trait]
    impl ScoreProvider for MockProvider {
        async fn fetch_predictions(
            &self,
            tickers: Vec<String>,
        ) -> Result<PredictResponse, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let behavior = {
                let mut script = self.script.lock().unwrap();
                if script.is_empty() {
                    Behavior::Ok
                } else {
                    script.remove(0)
                }
            };

            let count = match behavior {
                Behavior::Ok => tickers.len(),
                Behavior::Count(n) => n,
                Behavior::Fail => {
                    return Err(ApiError::RequestError("connection refused".to_string()));
                }
                Behavior::Slow(delay) => {
                    tokio::time::sleep(delay).await;
                    tickers.len()
                }
            };

            Ok(PredictResponse {
                results: (0..count).map(make_result).collect(),
            })
        }
    }

    fn pipeline_with(provider: MockProvider) -> RenderPipeline {
        RenderPipeline::new(Arc::new(provider), CompanyDirectory::builtin())
    }

    #[tokio::test]
    async fn test_one_card_per_result_in_request_order() {
        let pipeline = pipeline_with(MockProvider::well_behaved());

        let count = pipeline.submit("TSLA,AAPL").await.unwrap();
        assert_eq!(count, 2);

        let cards = pipeline.cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].company.name, "Tesla");
        assert_eq!(cards[1].company.name, "Apple");
        assert_eq!(pipeline.state(), PipelineState::Idle);
    }

    #[tokio::test]
    async fn test_empty_input_issues_no_fetch() {
        let provider = Arc::new(MockProvider::well_behaved());
        let pipeline = RenderPipeline::new(
            Arc::clone(&provider) as Arc<dyn ScoreProvider>,
            CompanyDirectory::builtin(),
        );

        let err = pipeline.submit("   ").await.unwrap_err();
        assert!(matches!(err, AppError::EmptyInput));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
        assert_eq!(pipeline.state(), PipelineState::Idle);
        assert!(pipeline.cards().is_empty());
    }

    #[tokio::test]
    async fn test_mismatched_response_is_rejected_and_board_kept() {
        let pipeline = pipeline_with(MockProvider::scripted(vec![
            Behavior::Ok,
            Behavior::Count(1),
        ]));
        pipeline.submit("TSLA,AAPL").await.unwrap();
        assert_eq!(pipeline.cards().len(), 2);

        let err = pipeline.submit("TSLA,AAPL").await.unwrap_err();
        match err {
            AppError::MismatchedResults {
                requested,
                returned,
            } => {
                assert_eq!(requested, 2);
                assert_eq!(returned, 1);
            }
            other => panic!("unexpected error: {}", other),
        }

        // the board keeps the cards from the last good response
        assert_eq!(pipeline.cards().len(), 2);
        assert_eq!(pipeline.state(), PipelineState::Idle);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_previous_board() {
        let pipeline = pipeline_with(MockProvider::scripted(vec![Behavior::Ok, Behavior::Fail]));
        pipeline.submit("TSLA").await.unwrap();
        assert_eq!(pipeline.cards().len(), 1);

        assert!(matches!(
            pipeline.submit("TSLA").await.unwrap_err(),
            AppError::Api(_)
        ));

        assert_eq!(pipeline.cards().len(), 1);
        assert_eq!(pipeline.state(), PipelineState::Idle);
    }

    #[tokio::test]
    async fn test_new_submission_supersedes_in_flight_fetch() {
        let provider =
            MockProvider::scripted(vec![Behavior::Slow(Duration::from_secs(5))]);
        let pipeline = Arc::new(pipeline_with(provider));

        let slow = Arc::clone(&pipeline);
        let first = tokio::spawn(async move { slow.submit("TSLA").await });

        // let the first fetch get in flight before superseding it
        tokio::time::sleep(Duration::from_millis(50)).await;
        let count = pipeline.submit("AAPL").await.unwrap();
        assert_eq!(count, 1);

        let first_result = first.await.unwrap();
        assert!(matches!(first_result, Err(AppError::Superseded)));

        let cards = pipeline.cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].company.name, "Apple");
    }

    #[tokio::test]
    async fn test_render_to_writes_board() {
        let pipeline = pipeline_with(MockProvider::well_behaved());
        pipeline.submit("tsla").await.unwrap();

        let mut buffer: Vec<u8> = Vec::new();
        pipeline.render_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Tesla (TSLA)"));
    }
}
