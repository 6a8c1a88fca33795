use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use plotters::prelude::*;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

use crate::api::predictor::models::{
    ApiError, FeatureImportance, GraphData, SentimentBreakdown, TrendSeries,
};
use crate::api::predictor::PredictorClient;
use crate::config::Config;
use crate::error::AppError;

// Series colors, matching the dashboard theme
const FINAL_COLOR: RGBColor = RGBColor(0x58, 0xa6, 0xff);
const RULE_COLOR: RGBColor = RGBColor(0xd2, 0x99, 0x22);
const ML_COLOR: RGBColor = RGBColor(0x2e, 0xa0, 0x43);
const POSITIVE_COLOR: RGBColor = RGBColor(0x2e, 0xa0, 0x43);
const NEUTRAL_COLOR: RGBColor = RGBColor(0x79, 0xc0, 0xff);
const NEGATIVE_COLOR: RGBColor = RGBColor(0xf8, 0x51, 0x49);

/// Source of single-ticker graph data
#[async_trait]
pub trait GraphProvider: Send + Sync {
    async fn fetch_graph(&self, ticker: &str) -> Result<GraphData, ApiError>;
}

#[async_trait]
impl GraphProvider for PredictorClient {
    async fn fetch_graph(&self, ticker: &str) -> Result<GraphData, ApiError> {
        self.predict_one(ticker).await
    }
}

/// Fetches a ticker's graph data and renders the three chart PNGs
///
/// One fetch per ticker may be in flight at a time; a newer request for the
/// same ticker aborts the old one. Nothing is rendered on a failed fetch.
pub struct ChartStudio {
    provider: Arc<dyn GraphProvider>,
    out_dir: PathBuf,
    width: u32,
    height: u32,
    in_flight: Mutex<HashMap<String, AbortHandle>>,
}

impl ChartStudio {
    /// Create a studio writing into the configured chart directory
    ///
    /// The directory is created up front; an unusable location is reported
    /// before any network call is made.
    pub fn new(provider: Arc<dyn GraphProvider>, config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.chart_dir)
            .map_err(|_| AppError::MissingOutput(config.chart_dir.clone()))?;

        Ok(Self {
            provider,
            out_dir: config.chart_dir.clone(),
            width: config.chart_width,
            height: config.chart_height,
            in_flight: Mutex::new(HashMap::new()),
        })
    }

    /// Fetch graph data for a ticker and render all three charts
    ///
    /// Returns the paths of the written PNGs, in trend/feature/sentiment
    /// order.
    pub async fn render_for(&self, ticker: &str) -> Result<Vec<PathBuf>, AppError> {
        let symbol = ticker.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(AppError::EmptyInput);
        }

        debug!("Fetching graph data for {}", symbol);
        let provider = Arc::clone(&self.provider);
        let fetch_symbol = symbol.clone();
        let task = tokio::spawn(async move { provider.fetch_graph(&fetch_symbol).await });

        {
            let mut slots = self.in_flight.lock().unwrap();
            if let Some(previous) = slots.insert(symbol.clone(), task.abort_handle()) {
                warn!("Superseding an in-flight graph fetch for {}", symbol);
                previous.abort();
            }
        }

        let data = match task.await {
            Ok(Ok(data)) => data,
            Ok(Err(api_err)) => return Err(api_err.into()),
            Err(join_err) if join_err.is_cancelled() => return Err(AppError::Superseded),
            Err(join_err) => {
                return Err(ApiError::RequestError(join_err.to_string()).into());
            }
        };

        let trend_path = self.out_dir.join(format!("{}_trends.png", symbol));
        let feature_path = self.out_dir.join(format!("{}_features.png", symbol));
        let sentiment_path = self.out_dir.join(format!("{}_sentiment.png", symbol));

        render_trend_chart(&symbol, &data.trends, &trend_path, self.width, self.height)?;
        render_feature_chart(&symbol, &data.features, &feature_path, self.width, self.height)?;
        render_sentiment_chart(
            &symbol,
            &data.sentiment,
            &sentiment_path,
            self.width,
            self.height,
        )?;

        info!("Rendered 3 chart(s) for {}", symbol);
        Ok(vec![trend_path, feature_path, sentiment_path])
    }
}

fn score_range(series: &[&[f64]]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for values in series {
        for &v in *values {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let padding = (max - min).max(1e-8) * 0.1;
    (min - padding, max + padding)
}

/// Line chart of the three score trend series
pub fn render_trend_chart(
    ticker: &str,
    trends: &TrendSeries,
    path: &Path,
    width: u32,
    height: u32,
) -> Result<(), AppError> {
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| AppError::Chart(format!("Failed to fill canvas: {}", e)))?;

    let len = trends
        .final_
        .len()
        .max(trends.rule.len())
        .max(trends.ml.len())
        .max(2);
    let (y_min, y_max) = score_range(&[
        trends.final_.as_slice(),
        trends.rule.as_slice(),
        trends.ml.as_slice(),
    ]);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} Score Trends", ticker),
            ("sans-serif", 40.0).into_font(),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..(len - 1) as f64, y_min..y_max)
        .map_err(|e| AppError::Chart(format!("Failed to build chart: {}", e)))?;

    chart
        .configure_mesh()
        .y_desc("Score")
        .x_desc("Snapshot")
        .draw()
        .map_err(|e| AppError::Chart(format!("Failed to draw mesh: {}", e)))?;

    let series: [(&[f64], RGBColor, &str); 3] = [
        (trends.final_.as_slice(), FINAL_COLOR, "Final Score"),
        (trends.rule.as_slice(), RULE_COLOR, "Rule Score"),
        (trends.ml.as_slice(), ML_COLOR, "ML Score"),
    ];

    for (values, color, label) in series {
        chart
            .draw_series(LineSeries::new(
                values.iter().enumerate().map(|(i, v)| (i as f64, *v)),
                &color,
            ))
            .map_err(|e| AppError::Chart(format!("Failed to draw series: {}", e)))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| AppError::Chart(format!("Failed to draw legend: {}", e)))?;

    root.present()
        .map_err(|e| AppError::Chart(format!("Failed to render chart: {}", e)))?;

    Ok(())
}

/// Bar chart of feature importances
pub fn render_feature_chart(
    ticker: &str,
    features: &FeatureImportance,
    path: &Path,
    width: u32,
    height: u32,
) -> Result<(), AppError> {
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| AppError::Chart(format!("Failed to fill canvas: {}", e)))?;

    let count = features.names.len().max(1);
    let y_max = features
        .values
        .iter()
        .cloned()
        .fold(0f64, f64::max)
        .max(1e-8)
        * 1.1;
    let y_min = features.values.iter().cloned().fold(0f64, f64::min);

    let names = features.names.clone();
    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} Feature Importance", ticker),
            ("sans-serif", 40.0).into_font(),
        )
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d((0..count).into_segmented(), y_min..y_max)
        .map_err(|e| AppError::Chart(format!("Failed to build chart: {}", e)))?;

    chart
        .configure_mesh()
        .y_desc("Importance")
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                names.get(*i).cloned().unwrap_or_default()
            }
            _ => String::new(),
        })
        .draw()
        .map_err(|e| AppError::Chart(format!("Failed to draw mesh: {}", e)))?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(FINAL_COLOR.filled())
                .margin(10)
                .data(features.values.iter().enumerate().map(|(i, v)| (i, *v))),
        )
        .map_err(|e| AppError::Chart(format!("Failed to draw bars: {}", e)))?;

    root.present()
        .map_err(|e| AppError::Chart(format!("Failed to render chart: {}", e)))?;

    Ok(())
}

/// Pie chart of the event sentiment distribution
pub fn render_sentiment_chart(
    ticker: &str,
    sentiment: &SentimentBreakdown,
    path: &Path,
    width: u32,
    height: u32,
) -> Result<(), AppError> {
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| AppError::Chart(format!("Failed to fill canvas: {}", e)))?;

    let root = root
        .titled(
            &format!("{} Event Sentiment", ticker),
            ("sans-serif", 40.0).into_font(),
        )
        .map_err(|e| AppError::Chart(format!("Failed to draw title: {}", e)))?;

    let total = sentiment.positive + sentiment.neutral + sentiment.negative;
    if total <= 0.0 {
        // an all-zero distribution would produce degenerate slices
        root.draw(&Text::new(
            "No events recorded",
            (width as i32 / 2 - 120, height as i32 / 2),
            ("sans-serif", 30.0).into_font(),
        ))
        .map_err(|e| AppError::Chart(format!("Failed to draw placeholder: {}", e)))?;
        root.present()
            .map_err(|e| AppError::Chart(format!("Failed to render chart: {}", e)))?;
        return Ok(());
    }

    let center = ((width / 2) as i32, (height / 2) as i32);
    let radius = f64::from(width.min(height)) * 0.3;
    let sizes = vec![sentiment.positive, sentiment.neutral, sentiment.negative];
    let colors = vec![POSITIVE_COLOR, NEUTRAL_COLOR, NEGATIVE_COLOR];
    let labels = vec!["Positive", "Neutral", "Negative"];

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 24.0).into_font());
    root.draw(&pie)
        .map_err(|e| AppError::Chart(format!("Failed to draw pie: {}", e)))?;

    root.present()
        .map_err(|e| AppError::Chart(format!("Failed to render chart: {}", e)))?;

    Ok(())
}
