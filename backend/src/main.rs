//! Forum backend entry point: settings, tracing, store, and HTTP server.

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::WrapErr;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use forum_backend::inbound::http::health::HealthState;
use server::{ServerSettings, build_http_state, build_store, create_server};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(error) = fmt().with_env_filter(filter).json().try_init() {
        warn!(%error, "tracing init failed");
    }
}

#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = ServerSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .wrap_err("loading server settings")?;

    let health_state = web::Data::new(HealthState::new());
    let ports = build_store(&settings)
        .await
        .wrap_err("preparing the forum store")?;
    let http_state = build_http_state(ports);

    let (host, port) = settings.bind_target();
    let server = create_server(health_state, http_state, &settings)
        .wrap_err_with(|| format!("binding {host}:{port}"))?;
    info!(%host, port, "forum backend listening");

    server.await.wrap_err("server terminated")?;
    Ok(())
}
