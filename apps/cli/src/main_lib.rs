use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{CliConfig, LOG_FORMAT_VAR};
use dentquote_core::auth::{Identity, IdentityProviderTrait, StaticIdentityProvider};
use dentquote_core::catalog::CatalogServiceTrait;
use dentquote_core::export::QuoteExporter;
use dentquote_core::quotes::QuoteServiceTrait;
use dentquote_core::{AppConfig, DataMode, DataSource};
use dentquote_storage_sqlite::open_data_source;

pub struct AppState {
    pub mode: DataMode,
    pub catalog_service: Arc<dyn CatalogServiceTrait>,
    pub quote_service: Arc<dyn QuoteServiceTrait>,
    pub exporter: QuoteExporter,
    pub export_dir: PathBuf,
}

impl AppState {
    pub fn from_source(source: DataSource, export_dir: PathBuf) -> Self {
        Self {
            mode: source.mode,
            catalog_service: Arc::new(source.catalog_service()),
            quote_service: Arc::new(source.quote_service()),
            exporter: QuoteExporter::new(),
            export_dir,
        }
    }
}

/// Installs the global subscriber. `log` records from the library crates are
/// forwarded into it.
pub fn init_tracing() {
    let log_format = std::env::var(LOG_FORMAT_VAR).unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Publishes the configuration and picks the data source. Called once.
pub async fn build_state(config: &CliConfig) -> anyhow::Result<AppState> {
    let app = AppConfig::install(config.app.clone());

    let source = match app.database_url.as_deref() {
        Some(url) if app.backend_configured() => {
            let identity: Arc<dyn IdentityProviderTrait> = Arc::new(StaticIdentityProvider::new(
                config.operator_id.clone().map(Identity::new),
            ));
            if config.operator_id.is_none() {
                tracing::warn!("No operator configured, new quotes will be refused");
            }
            open_data_source(url, identity)?
        }
        _ => DataSource::fixture(app.fixture_latency),
    };
    tracing::info!("Data source in use: {}", source.mode);

    Ok(AppState::from_source(source, app.export_dir.clone()))
}
