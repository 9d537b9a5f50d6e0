//! Site event bus and lead notification delivery.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`SiteEvent`]: the events published by the API server.
//! - [`LeadDispatcher`]: background service that forwards submitted leads
//!   to email and Telegram.
//! - [`delivery`]: the external channels themselves.

pub mod bus;
pub mod delivery;
pub mod dispatcher;

pub use bus::{EventBus, LeadNotice, SiteEvent};
pub use delivery::email::{EmailConfig, EmailDelivery};
pub use delivery::telegram::TelegramDelivery;
pub use dispatcher::LeadDispatcher;
