//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerSettings;
pub use state_builders::{build_http_state, build_store};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use forum_backend::Trace;
#[cfg(debug_assertions)]
use forum_backend::doc::ApiDoc;
use forum_backend::inbound::http::configure_api;
use forum_backend::inbound::http::error::{json_error_handler, query_error_handler};
use forum_backend::inbound::http::health::{HealthState, live, ready};
use forum_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
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
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server over prepared state.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    settings: &ServerSettings,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(settings.bind_target())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
