use axum::extract::Request;
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Paths whose responses may be cached by browsers.
const CACHEABLE_PREFIXES: &[&str] = &["/static/", "/wm/"];

/// Mark dynamic responses as uncacheable so edited content shows up at once.
///
/// Responses that already carry a `Cache-Control` header are left alone.
pub async fn no_cache(request: Request, next: Next) -> Response {
    let cacheable = CACHEABLE_PREFIXES
        .iter()
        .any(|prefix| request.uri().path().starts_with(prefix));

    let mut response = next.run(request).await;
    if !cacheable && !response.headers().contains_key(header::CACHE_CONTROL) {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
    }
    response
}
