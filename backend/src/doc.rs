//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the `/users` operations, the health probes, and the
//! `User` and `ErrorBody` schemas. The document is served at
//! `/api-docs/openapi.json` and exported via `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::domain::User;
use crate::inbound::http::error::ErrorBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registry API",
        description = "CRUD operations on users held in a key-value store, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(User, ErrorBody)),
    tags(
        (name = "users", description = "Operations on users keyed by email"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
