//! User registry entry-point: loads settings, wires the store, serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{build_http_state, create_server};
use user_registry::inbound::http::health::HealthState;
use user_registry::settings::UserRegistrySettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = UserRegistrySettings::load()
        .map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let http_state = build_http_state(&settings)
        .await
        .wrap_err("failed to build application state")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), web::Data::new(http_state), bind_addr)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "user registry listening");

    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}
