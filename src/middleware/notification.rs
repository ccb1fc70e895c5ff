//! HTTP route for object notifications from the resized images bucket.
//!
//! `POST /photopush` with `authorization: Bearer <NOTIFICATION_SECRET>` and a
//! JSON `{"bucket": ..., "name": ...}` body marks the matching photo available.
//! Every other request goes to the gRPC services untouched.
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use http::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use http::{Method, Request as HttpRequest, Response as HttpResponse, StatusCode};
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Full, Limited};
use tonic::Status;
use tower::{Layer, Service};

use crate::db::PhotoStore;
use crate::services::availability::{handle_object_notification, ObjectNotification};

type BoxBody = UnsyncBoxBody<Bytes, Status>;

pub const NOTIFICATION_PATH: &str = "/photopush";

const MAX_NOTIFICATION_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct NotificationLayer {
    store: Arc<dyn PhotoStore>,
    secret: Option<Arc<str>>,
}

impl NotificationLayer {
    /// Without a secret the route is disabled.
    pub fn new(store: Arc<dyn PhotoStore>, secret: Option<String>) -> Self {
        Self {
            store,
            secret: secret.filter(|s| !s.is_empty()).map(Arc::from),
        }
    }
}

impl<S> Layer<S> for NotificationLayer {
    type Service = NotificationRoute<S>;

    fn layer(&self, inner: S) -> Self::Service {
        NotificationRoute {
            inner,
            store: self.store.clone(),
            secret: self.secret.clone(),
        }
    }
}

#[derive(Clone)]
pub struct NotificationRoute<S> {
    inner: S,
    store: Arc<dyn PhotoStore>,
    secret: Option<Arc<str>>,
}

impl<S> Service<HttpRequest<BoxBody>> for NotificationRoute<S>
where
    S: Service<HttpRequest<BoxBody>, Response = HttpResponse<BoxBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = HttpResponse<BoxBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: HttpRequest<BoxBody>) -> Self::Future {
        let secret = match &self.secret {
            Some(secret) if is_notification(&req) => secret.clone(),
            _ => {
                let mut inner = self.inner.clone();
                std::mem::swap(&mut self.inner, &mut inner);
                return Box::pin(inner.call(req));
            }
        };

        let store = self.store.clone();
        Box::pin(async move { Ok(notify(store.as_ref(), &secret, req).await) })
    }
}

fn is_notification<B>(req: &HttpRequest<B>) -> bool {
    req.method() == Method::POST && req.uri().path() == NOTIFICATION_PATH
}

fn authorized(headers: &HeaderMap, secret: &str) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().strip_prefix("Bearer "))
        .is_some_and(|token| token == secret)
}

async fn notify(
    store: &dyn PhotoStore,
    secret: &str,
    req: HttpRequest<BoxBody>,
) -> HttpResponse<BoxBody> {
    if !authorized(req.headers(), secret) {
        tracing::warn!("Rejected object notification: bad credentials");
        return reply(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let payload = match Limited::new(req.into_body(), MAX_NOTIFICATION_BYTES)
        .collect()
        .await
    {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            tracing::warn!("Unreadable object notification: {}", e);
            return reply(StatusCode::BAD_REQUEST, "Unreadable body");
        }
    };
    let notification = match ObjectNotification::from_json(&payload) {
        Ok(notification) => notification,
        Err(e) => {
            tracing::warn!("Invalid object notification: {}", e);
            return reply(StatusCode::BAD_REQUEST, "Invalid notification");
        }
    };

    match handle_object_notification(store, &notification).await {
        Ok(true) => reply(StatusCode::OK, "OK"),
        Ok(false) => reply(StatusCode::NOT_FOUND, "Photo not found"),
        Err(e) => {
            tracing::error!("Failed to apply object notification: {}", e);
            reply(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}

fn reply(status: StatusCode, message: &'static str) -> HttpResponse<BoxBody> {
    let body = Full::new(Bytes::from_static(message.as_bytes())).map_err(|err| match err {});
    let mut response = HttpResponse::new(UnsyncBoxBody::new(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    response
}
