//! Glavtrub API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! storefront view models) so integration tests and the binaries can all
//! reach them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod views;
