//! Receiver for the payment notifications BitIndex posts to the registered
//! webhook URL.

mod error;
mod receiver;

pub use error::WebhookError;
pub use receiver::{WebhookState, create_router, serve_webhooks};
