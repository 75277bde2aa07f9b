//! CORS layer configuration.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};

use noticeflow_core::config::app::CorsConfig;

/// Builds a CORS tower layer from configuration.
///
/// Credentials cannot be combined with wildcards, so when
/// `allow_credentials` is set the request origin and headers are mirrored.
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let wildcard = |values: &[String]| values.iter().any(|v| v == "*");

    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    let mut layer = CorsLayer::new()
        .allow_methods(methods)
        .max_age(Duration::from_secs(config.max_age_seconds));

    layer = match (wildcard(&config.allowed_origins), config.allow_credentials) {
        (true, false) => layer.allow_origin(Any),
        (true, true) => layer.allow_origin(AllowOrigin::mirror_request()),
        (false, _) => {
            let origins: Vec<HeaderValue> = config
                .allowed_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            layer.allow_origin(origins)
        }
    };

    layer = match (wildcard(&config.allowed_headers), config.allow_credentials) {
        (true, false) => layer.allow_headers(Any),
        (true, true) => layer.allow_headers(AllowHeaders::mirror_request()),
        (false, _) => {
            let headers: Vec<HeaderName> = config
                .allowed_headers
                .iter()
                .filter_map(|h| h.parse().ok())
                .collect();
            layer.allow_headers(headers)
        }
    };

    layer.allow_credentials(config.allow_credentials)
}
