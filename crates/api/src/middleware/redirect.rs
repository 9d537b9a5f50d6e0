//! Stored redirect rules, applied before routing.
//!
//! Every GET/HEAD request is resolved against the active rules in the
//! `redirect_rules` table. A hit short-circuits with a 301/302 and a
//! `Location` header; everything else falls through to the router.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use glavtrub_core::redirect::{is_exempt, resolve_with, Redirect, ResolveOptions};
use glavtrub_db::repositories::RedirectRuleRepo;

use crate::state::AppState;

/// Prefixes served by this process that must never be redirected, on top of
/// the static prefixes the resolver always skips.
pub const EXEMPT_PREFIXES: &[&str] = &["/api/", "/health", "/wm/"];

pub async fn apply_redirects(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return next.run(request).await;
    }

    let path = request.uri().path();
    if is_exempt(path, EXEMPT_PREFIXES) {
        return next.run(request).await;
    }
    let rules = match RedirectRuleRepo::active_rules(&state.pool).await {
        Ok(rules) => rules,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load redirect rules, skipping");
            return next.run(request).await;
        }
    };

    let options = ResolveOptions {
        exempt_prefixes: EXEMPT_PREFIXES,
    };
    match resolve_with(path, &rules, options) {
        Some(redirect) => {
            let location = with_query(&redirect.target, request.uri().query());
            tracing::info!(
                from = path,
                to = %location,
                status = redirect.status.code(),
                "Redirect rule matched"
            );
            redirect_response(&redirect, &location)
        }
        None => next.run(request).await,
    }
}

/// Carry the original query string over unless the target already has one.
fn with_query(target: &str, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() && !target.contains('?') => format!("{target}?{q}"),
        _ => target.to_string(),
    }
}

fn redirect_response(redirect: &Redirect, location: &str) -> Response {
    let status = StatusCode::from_u16(redirect.status.code()).unwrap_or(StatusCode::FOUND);
    match HeaderValue::from_str(location) {
        Ok(value) => Response::builder()
            .status(status)
            .header(header::LOCATION, value)
            .body(Body::empty())
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        Err(_) => {
            tracing::warn!(location, "Redirect target is not a valid header value");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
