//! Backend entry-point: serves the note and account handlers over HTTP.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use notes_backend::config::{NotesSettings, identity_pool_from_env};
use notes_backend::inbound::http::health::HealthState;
use notes_backend::inbound::http::state::HttpState;
use notes_backend::wiring::build_handler_ports;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = NotesSettings::load_for("notes-backend")?;
    let bind_addr = settings.bind_addr()?;
    let identity_pool = identity_pool_from_env(&DefaultEnv::new());
    let ports = build_handler_ports(&settings, identity_pool).await?;

    let config = ServerConfig::new(bind_addr, HttpState::from(ports));
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(make_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting notes server");
    create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?
        .await
        .wrap_err("server terminated abnormally")
}

#[cfg(feature = "metrics")]
fn make_metrics() -> Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("notes")
        .endpoint("/metrics")
        .build()
        .map_err(|e| color_eyre::eyre::eyre!("configure Prometheus metrics: {e}"))
}
