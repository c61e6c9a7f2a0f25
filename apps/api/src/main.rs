mod analysis;
mod config;
mod errors;
mod extraction;
mod report;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::parser::RuleParser;
use crate::analysis::sentiment::SentimentScorer;
use crate::analysis::suggestions::ReplacementTable;
use crate::analysis::Analyzer;
use crate::config::Config;
use crate::report::default_page_config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Tone Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Analysis services are loaded once; a bad model or table file stops startup.
    let replacements = ReplacementTable::load(config.replacements_path.as_deref())
        .context("failed to load replacement table")?;
    info!("Replacement table loaded ({} entries)", replacements.len());

    let parser = RuleParser::load(config.parser_model_path.as_deref())
        .context("failed to load dependency parser model")?;
    info!("Dependency parser ready ({} participles)", parser.lexicon_size());

    let analyzer = Analyzer::new(
        Arc::new(replacements),
        Arc::new(parser),
        SentimentScorer::default(),
    );

    let page_config = default_page_config();
    info!(
        "Report page: {}x{}pt, {}pt margins",
        page_config.width_pt, page_config.height_pt, page_config.margin_pt
    );

    // Build app state
    let state = AppState {
        config: config.clone(),
        analyzer: Arc::new(analyzer),
        page_config,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
