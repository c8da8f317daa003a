use axum::{
    extract::Request,
    http::{header, Method, Uri},
    response::{IntoResponse, Response},
};

use super::utils::ErrorUtils;
use crate::api::errors::{ApiError, ErrorEnvelope};

/// Upper bound on a rejection body we read back to reuse as the message
const MAX_REJECTION_BODY_BYTES: usize = 16 * 1024;

/// Error handling middleware layer
#[derive(Clone)]
pub struct ErrorHandlingLayer;

impl<S> tower::Layer<S> for ErrorHandlingLayer
where
    S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Service = ErrorHandlingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorHandlingService { inner }
    }
}

/// Error handling service wrapper
#[derive(Clone)]
pub struct ErrorHandlingService<S> {
    inner: S,
}

impl<S> tower::Service<Request> for ErrorHandlingService<S>
where
    S: tower::Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    S::Response: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let uri = req.uri().clone();
            let method = req.method().clone();

            let response = inner.call(req).await?;
            let status = response.status();

            if !(status.is_client_error() || status.is_server_error()) {
                return Ok(response);
            }

            ErrorUtils::log_error(status, &uri, &method);

            if response.extensions().get::<ErrorEnvelope>().is_some() {
                return Ok(response);
            }

            Ok(Self::wrap_in_envelope(response, &uri, &method).await)
        })
    }
}

impl<S> ErrorHandlingService<S> {
    async fn wrap_in_envelope(response: Response, uri: &Uri, method: &Method) -> Response {
        let status = response.status();
        let (parts, body) = response.into_parts();

        let is_text = parts
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("text/plain"))
            .unwrap_or(false);

        let original = if is_text {
            axum::body::to_bytes(body, MAX_REJECTION_BODY_BYTES)
                .await
                .ok()
                .map(|bytes| String::from_utf8_lossy(&bytes).trim().to_string())
                .filter(|text| !text.is_empty())
        } else {
            None
        };

        let message = original.unwrap_or_else(|| match status.as_u16() {
            404 => format!("No route for {} {}", method, uri.path()),
            _ => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        });

        ApiError::new(status, message).into_response()
    }
}

/// Create error handling middleware
pub fn create_error_handling_middleware() -> ErrorHandlingLayer {
    ErrorHandlingLayer
}
