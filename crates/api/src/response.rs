//! Shared response envelope types for the admin API.
//!
//! Admin responses use a `{ "data": ... }` envelope. Public storefront view
//! models are returned bare.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
