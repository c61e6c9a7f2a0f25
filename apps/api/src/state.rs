use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::report::PageConfig;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Replacement table, dependency parser and sentiment scorer, loaded once.
    pub analyzer: Arc<Analyzer>,
    /// Report page geometry. Defaults to A4 with 1" margins.
    pub page_config: PageConfig,
}
