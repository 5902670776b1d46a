//! Messenger Send API channel.
//!
//! Delivery collaborator for the dialogue engine: turns scheduled response
//! intents into Send API calls. All intents for one recipient's turn are
//! sent from a single spawned task that sleeps out each relative delay, so
//! submission order is preserved without ever awaiting delivery results on
//! the turn path.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, warn};

use crate::dialog::types::{ResponseIntent, ScheduledResponse};
use crate::error::ChannelError;

const SEND_API_URL: &str = "https://graph.facebook.com/v2.6/me/messages";

/// Transport that can deliver one response intent to one recipient.
#[async_trait]
pub trait SendTransport: Send + Sync {
    async fn send(&self, recipient: &str, intent: &ResponseIntent) -> Result<(), ChannelError>;
}

/// Fire-and-forget dispatch of one turn's responses to a recipient.
///
/// Returns immediately; a spawned task delivers the intents in submission
/// order, sleeping until each one's offset from the turn start has elapsed.
/// Delivery failures are logged, never surfaced to the turn handler.
pub fn dispatch(
    transport: Arc<dyn SendTransport>,
    recipient: &str,
    responses: Vec<ScheduledResponse>,
) {
    let recipient = recipient.to_string();
    tokio::spawn(async move {
        let mut elapsed = Duration::ZERO;
        for response in responses {
            if response.delay > elapsed {
                tokio::time::sleep(response.delay - elapsed).await;
                elapsed = response.delay;
            }
            if let Err(e) = transport.send(&recipient, &response.intent).await {
                warn!(recipient = %recipient, error = %e, "Send API call failed");
            }
        }
    });
}

/// Outbound Messenger channel.
pub struct MessengerChannel {
    page_access_token: SecretString,
    client: reqwest::Client,
}

impl MessengerChannel {
    pub fn new(page_access_token: SecretString) -> Self {
        Self {
            page_access_token,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SendTransport for MessengerChannel {
    async fn send(&self, recipient: &str, intent: &ResponseIntent) -> Result<(), ChannelError> {
        let message = match intent {
            ResponseIntent::Text { text } => json!({ "text": text }),
            ResponseIntent::Image { url } => json!({
                "attachment": { "type": "image", "payload": { "url": url } }
            }),
            ResponseIntent::QuickReplies { text, options } => json!({
                "text": text,
                "quick_replies": options
                    .iter()
                    .map(|o| json!({
                        "content_type": "text",
                        "title": o.label,
                        "payload": o.payload,
                    }))
                    .collect::<Vec<_>>(),
            }),
        };
        let body = json!({
            "recipient": { "id": recipient },
            "message": message,
        });

        let resp = self
            .client
            .post(SEND_API_URL)
            .query(&[("access_token", self.page_access_token.expose_secret())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ChannelError::SendFailed {
                recipient: recipient.to_string(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(ChannelError::ApiRejected {
                recipient: recipient.to_string(),
                status: resp.status().to_string(),
            });
        }

        debug!(recipient = %recipient, "Send API call succeeded");
        Ok(())
    }
}
