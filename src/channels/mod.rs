//! Thin platform collaborators: webhook intake and Send API delivery.

pub mod messenger;
pub mod webhook;

pub use messenger::{dispatch, MessengerChannel, SendTransport};
pub use webhook::{webhook_routes, WebhookState};
