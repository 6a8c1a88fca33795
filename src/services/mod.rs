pub mod card_service;
pub mod chart_service;
pub mod company_service;
pub mod pipeline;
pub mod snapshot_service;
pub mod ticker_service;
