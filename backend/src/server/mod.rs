//! Server construction and middleware wiring.

mod state_builders;

pub use state_builders::build_http_state;

use std::net::SocketAddr;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, HttpServer, web};
use utoipa::OpenApi;

use user_registry::ApiDoc;
use user_registry::inbound::http::health::{HealthState, live, ready};
use user_registry::inbound::http::state::HttpState;
use user_registry::inbound::http::users;
use user_registry::middleware::RequestTrace;

/// Shared state handed to every worker's [`App`].
#[derive(Clone)]
pub struct AppDependencies {
    /// Probe flags flipped by startup and shutdown.
    pub health_state: web::Data<HealthState>,
    /// Handler dependencies.
    pub http_state: web::Data<HttpState>,
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Assemble routes, probes and tracing around `deps`.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(RequestTrace)
        .configure(users::configure)
        .service(ready)
        .service(live)
        .route("/api-docs/openapi.json", web::get().to(openapi_json))
}

/// Bind the HTTP server and mark the service ready.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    bind_addr: SocketAddr,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
