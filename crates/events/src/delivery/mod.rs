//! External delivery channels for lead notifications.

pub mod email;
pub mod telegram;
