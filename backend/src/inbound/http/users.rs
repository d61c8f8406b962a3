//! Users API handlers.
//!
//! ```text
//! GET    /users?email=a@b.com
//! POST   /users {"email":"a@b.com","firstName":"A","lastName":"B"}
//! PUT    /users {"email":"a@b.com","firstName":"A2","lastName":"B2"}
//! DELETE /users?email=a@b.com
//! ```
//!
//! Bodies are forwarded to the domain as raw bytes so decoding failures
//! surface as `invalid user data` rather than an extractor error. Any other
//! method on `/users` answers 400 with an empty body.

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

/// Query string identifying a user by email.
///
/// A missing `email` parameter reads as the empty string.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Email address of the user.
    #[serde(default)]
    #[param(example = "ada@example.com")]
    pub email: String,
}

/// Fetch a user by email.
#[utoipa::path(
    get,
    path = "/users",
    params(EmailQuery),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Store failure", body = ErrorBody),
        (status = 404, description = "User does not exist", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
pub async fn get_user(
    state: web::Data<HttpState>,
    query: web::Query<EmailQuery>,
) -> ApiResult<web::Json<User>> {
    let user = state.users.get_user(&query.email).await?;
    Ok(web::Json(user))
}

/// Create a user from a JSON body.
#[utoipa::path(
    post,
    path = "/users",
    request_body = User,
    responses(
        (status = 200, description = "User created", body = User),
        (status = 400, description = "Invalid data, invalid email, duplicate, or store failure", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
pub async fn create_user(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<web::Json<User>> {
    let user = state.users.create_user(&body).await?;
    Ok(web::Json(user))
}

/// Replace an existing user's record from a JSON body.
#[utoipa::path(
    put,
    path = "/users",
    request_body = User,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid data or store failure", body = ErrorBody),
        (status = 404, description = "User does not exist", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
pub async fn update_user(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<web::Json<User>> {
    let user = state.users.update_user(&body).await?;
    Ok(web::Json(user))
}

/// Delete a user by email.
#[utoipa::path(
    delete,
    path = "/users",
    params(EmailQuery),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Store failure", body = ErrorBody),
        (status = 404, description = "User does not exist", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
pub async fn delete_user(
    state: web::Data<HttpState>,
    query: web::Query<EmailQuery>,
) -> ApiResult<HttpResponse> {
    state.users.delete_user(&query.email).await?;
    Ok(HttpResponse::Ok().finish())
}

async fn unhandled_method(request: actix_web::HttpRequest) -> HttpResponse {
    debug!(method = %request.method(), "unsupported method on /users");
    HttpResponse::BadRequest().finish()
}

/// Register the `/users` resource.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::inbound::http::users;
///
/// let app = App::new().configure(users::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users")
            .route(web::get().to(get_user))
            .route(web::post().to(create_user))
            .route(web::put().to(update_user))
            .route(web::delete().to(delete_user))
            .default_service(web::route().to(unhandled_method)),
    );
}
