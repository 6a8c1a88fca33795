use std::path::PathBuf;

/// Runtime configuration, resolved from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the prediction backend
    pub api_base_url: String,
    /// Directory chart PNGs are written to
    pub chart_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Config {
    pub const DEFAULT_API_BASE_URL: &'static str = "http://127.0.0.1:5000";
    pub const DEFAULT_CHART_DIR: &'static str = "charts";
    pub const DEFAULT_CHART_WIDTH: u32 = 1024;
    pub const DEFAULT_CHART_HEIGHT: u32 = 768;

    /// Read configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("PREDICTOR_API_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_API_BASE_URL.to_string());

        let chart_dir = std::env::var("TICKERDECK_CHART_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_CHART_DIR));

        let chart_width = std::env::var("TICKERDECK_CHART_WIDTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Self::DEFAULT_CHART_WIDTH);

        let chart_height = std::env::var("TICKERDECK_CHART_HEIGHT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Self::DEFAULT_CHART_HEIGHT);

        Self {
            api_base_url,
            chart_dir,
            chart_width,
            chart_height,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Self::DEFAULT_API_BASE_URL.to_string(),
            chart_dir: PathBuf::from(Self::DEFAULT_CHART_DIR),
            chart_width: Self::DEFAULT_CHART_WIDTH,
            chart_height: Self::DEFAULT_CHART_HEIGHT,
        }
    }
}
