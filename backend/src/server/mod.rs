//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use roster::Trace;
#[cfg(debug_assertions)]
use roster::doc::ApiDoc;
use roster::inbound::http::configure;
use roster::inbound::http::health::{HealthState, live, ready};
use roster::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

pub(crate) fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] with the bind address, timeouts and optional pool.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener. Actix installs
/// SIGINT/SIGTERM handlers and drains in-flight requests for the configured
/// shutdown window.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(config.db_pool.as_ref());
    let ServerConfig {
        bind_addr,
        db_pool: _,
        client_request_timeout,
        keep_alive,
        shutdown_timeout,
    } = config;

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .client_request_timeout(client_request_timeout)
        .keep_alive(keep_alive)
        .shutdown_timeout(shutdown_timeout.as_secs())
        .bind(bind_addr)?;

    for addr in server.addrs() {
        info!(%addr, "listening");
    }

    let server = server.run();
    health_state.mark_ready();
    Ok(server)
}
