//! Inbound webhook: verification handshake, signature check, event intake.
//!
//! The webhook translates platform messaging events into [`InboundEvent`]s,
//! runs each through the dialogue engine, and hands the resulting intents
//! to the Messenger channel. Unknown event shapes are logged and dropped
//! deterministically; the platform always gets a 200 for a valid delivery.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha1::Sha1;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::channels::messenger::{dispatch, MessengerChannel, SendTransport};
use crate::dialog::engine::DialogEngine;
use crate::dialog::types::{EventKind, InboundEvent};

type HmacSha1 = Hmac<Sha1>;

/// Shared state for the webhook routes.
#[derive(Clone)]
pub struct WebhookState {
    pub engine: Arc<DialogEngine>,
    pub channel: Arc<MessengerChannel>,
    pub app_secret: SecretString,
    pub verify_token: String,
}

/// Build the webhook router.
pub fn webhook_routes(state: WebhookState) -> Router {
    Router::new()
        .route("/webhook", get(verify).post(receive))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Verification handshake: echo the challenge if the token matches.
async fn verify(
    State(state): State<WebhookState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let mode_ok = params.get("hub.mode").map(String::as_str) == Some("subscribe");
    let token_ok = params.get("hub.verify_token") == Some(&state.verify_token);
    if mode_ok && token_ok {
        info!("webhook verified");
        (
            StatusCode::OK,
            params.get("hub.challenge").cloned().unwrap_or_default(),
        )
    } else {
        warn!("webhook verification failed, check that the tokens match");
        (StatusCode::FORBIDDEN, String::new())
    }
}

/// Receive a batched webhook delivery.
async fn receive(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    if !signature_valid(state.app_secret.expose_secret().as_bytes(), &headers, &body) {
        warn!("rejecting webhook delivery with bad signature");
        return StatusCode::FORBIDDEN;
    }

    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            warn!(error = %e, "unparseable webhook body");
            return StatusCode::BAD_REQUEST;
        }
    };

    if payload.object != "page" {
        debug!(object = %payload.object, "ignoring non-page webhook object");
        return StatusCode::OK;
    }

    for entry in payload.entry {
        for messaging in entry.messaging {
            if let Some(event) = translate(messaging) {
                let responses = state.engine.handle_event(&event);
                let transport: Arc<dyn SendTransport> = state.channel.clone();
                dispatch(transport, &event.user_id, responses);
            }
        }
    }

    StatusCode::OK
}

/// Verify the `X-Hub-Signature` header: `sha1=<hex hmac>` over the raw body
/// keyed by the app secret.
pub fn signature_valid(secret: &[u8], headers: &HeaderMap, body: &[u8]) -> bool {
    let Some(signature) = headers
        .get("x-hub-signature")
        .and_then(|v| v.to_str().ok())
    else {
        warn!("missing X-Hub-Signature header");
        return false;
    };
    let Some(hex_digest) = signature.strip_prefix("sha1=") else {
        return false;
    };
    let Ok(given) = hex::decode(hex_digest) else {
        return false;
    };

    let mut mac = HmacSha1::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(body);
    mac.verify_slice(&given).is_ok()
}

// ── Wire format ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct WebhookPayload {
    object: String,
    #[serde(default)]
    entry: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    #[serde(default)]
    messaging: Vec<MessagingEvent>,
}

#[derive(Debug, Deserialize)]
struct MessagingEvent {
    sender: Principal,
    message: Option<ReceivedMessage>,
    delivery: Option<serde_json::Value>,
    read: Option<serde_json::Value>,
    optin: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Principal {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ReceivedMessage {
    #[serde(default)]
    is_echo: bool,
    text: Option<String>,
    quick_reply: Option<QuickReplyPayload>,
    attachments: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct QuickReplyPayload {
    payload: String,
}

/// Translate one wire messaging event into an [`InboundEvent`].
///
/// Echoes, delivery receipts, read receipts, and opt-ins produce no turn.
fn translate(event: MessagingEvent) -> Option<InboundEvent> {
    let user_id = event.sender.id;

    if let Some(message) = event.message {
        if message.is_echo {
            return None;
        }
        if let Some(quick_reply) = message.quick_reply {
            return Some(InboundEvent::quick_reply(user_id, quick_reply.payload));
        }
        if let Some(text) = message.text {
            return Some(InboundEvent::text(user_id, text));
        }
        if message.attachments.is_some() {
            return Some(InboundEvent::attachment(user_id));
        }
        debug!(user = %user_id, "message event with no content");
        return None;
    }
    if event.delivery.is_some() {
        debug!(user = %user_id, "delivery receipt");
        return None;
    }
    if event.read.is_some() {
        debug!(user = %user_id, "read receipt");
        return None;
    }
    if event.optin.is_some() {
        info!(user = %user_id, "opt-in event");
        return None;
    }

    warn!(user = %user_id, "unknown messaging event shape");
    None
}
