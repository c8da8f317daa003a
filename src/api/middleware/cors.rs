use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// CORS restricted to the configured origins
pub fn create_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
        .collect();

    let origins = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::HEAD,
        ])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers([HeaderName::from_static("location")])
        .allow_credentials(false)
        .max_age(std::time::Duration::from_secs(86400)) // 24 hours
}

/// CORS configuration for development (more permissive)
pub fn create_development_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(AllowMethods::any())
        .allow_headers(AllowHeaders::any())
}

/// Select appropriate CORS layer based on environment
pub fn create_cors_layer_for_environment(environment: &str, allowed_origins: &[String]) -> CorsLayer {
    if environment.eq_ignore_ascii_case("development") {
        create_development_cors_layer()
    } else {
        create_cors_layer(allowed_origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    async fn preflight(layer: CorsLayer, origin: &str) -> Option<String> {
        let app = Router::new().route("/", get(|| async { "ok" })).layer(layer);
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/")
                    .header("origin", origin)
                    .header("access-control-request-method", "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_configured_origin_is_allowed() {
        let layer = create_cors_layer(&["https://shop.example.com".to_string()]);
        assert_eq!(
            preflight(layer, "https://shop.example.com").await.as_deref(),
            Some("https://shop.example.com")
        );
    }

    #[tokio::test]
    async fn test_unknown_origin_is_not_allowed() {
        let layer = create_cors_layer(&["https://shop.example.com".to_string()]);
        assert_eq!(preflight(layer, "https://evil.example.com").await, None);
    }

    #[tokio::test]
    async fn test_development_allows_any_origin() {
        let layer = create_cors_layer_for_environment("development", &[]);
        assert_eq!(
            preflight(layer, "http://anything.local").await.as_deref(),
            Some("*")
        );
    }
}
