use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates the CORS layer for the front end.
///
/// `allowed_origins` is a comma-separated origin list; when it is unset the
/// layer is fully permissive, which is what local development wants. The API
/// only ever serves GET and POST.
pub fn cors_layer(allowed_origins: Option<&str>) -> CorsLayer {
    let Some(list) = allowed_origins else {
        return CorsLayer::very_permissive();
    };

    let origins = list
        .split(',')
        .filter_map(|origin| origin.trim().parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
