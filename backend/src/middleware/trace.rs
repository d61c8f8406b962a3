//! Request tracing middleware.
//!
//! Every request runs inside an `http_request` span carrying a fresh UUID
//! `request_id`, so domain and adapter logs emitted while serving it can be
//! correlated. The identifier is echoed back in the `request-id` response
//! header and a completion event records the status and latency.

use std::future::Future;
use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tokio::task_local;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

/// Response header carrying the request identifier.
pub const REQUEST_ID_HEADER: &str = "request-id";

task_local! {
    static REQUEST_ID: RequestId;
}

/// Identifier assigned to a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(Uuid);

impl RequestId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request being served, if any.
    pub fn current() -> Option<Self> {
        REQUEST_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `id` as the current request identifier.
    pub async fn scope<Fut>(id: RequestId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        REQUEST_ID.scope(id, fut).await
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Middleware wrapping each request in a tracing span.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::middleware::RequestTrace;
///
/// let _app = App::new().wrap(RequestTrace);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

/// Service produced by [`RequestTrace`].
pub struct RequestTraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = RequestId::generate();
        let span = info_span!(
            "http_request",
            request_id = %request_id,
            method = %req.method(),
            path = %req.path(),
        );
        let started = Instant::now();
        let fut = span.in_scope(|| self.service.call(req));

        Box::pin(RequestId::scope(
            request_id,
            async move {
                let mut res = fut.await?;
                let status = res.status().as_u16();
                let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                info!(status, elapsed_ms, "request completed");

                match HeaderValue::from_str(&request_id.to_string()) {
                    Ok(value) => {
                        res.headers_mut()
                            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
                    }
                    Err(error) => warn!(%error, "request id is not a valid header value"),
                }
                Ok(res)
            }
            .instrument(span),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};
    use rstest::rstest;

    async fn call_with<F, Fut>(handler: F) -> ServiceResponse
    where
        F: Fn() -> Fut + Clone + 'static,
        Fut: Future<Output = HttpResponse> + 'static,
    {
        let app = test::init_service(
            App::new()
                .wrap(RequestTrace)
                .route("/", web::get().to(handler)),
        )
        .await;
        test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await
    }

    fn header_id(res: &ServiceResponse) -> String {
        res.headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .expect("request id header")
            .to_owned()
    }

    #[rstest]
    #[tokio::test]
    async fn current_is_none_outside_a_request() {
        assert!(RequestId::current().is_none());
    }

    #[rstest]
    #[actix_web::test]
    async fn response_carries_uuid_request_id() {
        let res = call_with(|| async { HttpResponse::Ok().finish() }).await;
        let id = header_id(&res);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[rstest]
    #[actix_web::test]
    async fn handler_sees_same_request_id() {
        let res = call_with(|| async {
            let id = RequestId::current().map(|id| id.to_string());
            HttpResponse::Ok().body(id.unwrap_or_default())
        })
        .await;
        let expected = header_id(&res);
        let body = test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn each_request_gets_a_new_id() {
        let first = header_id(&call_with(|| async { HttpResponse::Ok().finish() }).await);
        let second = header_id(&call_with(|| async { HttpResponse::Ok().finish() }).await);
        assert_ne!(first, second);
    }
}
