//! Roster entry-point: loads settings, prepares the store and serves the
//! groups and users API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use roster::config::ServiceSettings;
use roster::inbound::http::health::HealthState;
use roster::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
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

    let settings = ServiceSettings::load().wrap_err("failed to load configuration")?;
    let bind_addr = settings
        .bind_addr()
        .wrap_err("ROSTER_BIND_ADDR is not a socket address")?;

    let mut config = ServerConfig::new(bind_addr);
    if let Some(database_url) = settings.database_url() {
        if settings.run_migrations() {
            apply_migrations(database_url)
                .await
                .wrap_err("failed to migrate database")?;
        }
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await
        .wrap_err("failed to create database pool")?;
        config = config.with_db_pool(pool);
    }

    info!(addr = %config.bind_addr(), "starting roster");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start server")?;
    server.await.wrap_err("server terminated abnormally")
}
