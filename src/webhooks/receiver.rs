use std::future::Future;

use anyhow::Context;
use axum::{Json, Router, body::Bytes, extract::State, routing::post};
use log::{debug, info, warn};
use serde_json::{Value as JsonValue, json};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use super::error::WebhookError;
use crate::log::{mask_amount, mask_string};
use crate::models::WebhookNotification;

#[derive(Clone)]
pub struct WebhookState {
    /// Expected shared secret. Callbacks are accepted unchecked when unset.
    pub secret: Option<String>,
    pub sender: mpsc::Sender<WebhookNotification>,
}

/// Builds a router accepting BitIndex callbacks on `POST {path}`.
///
/// Accepted notifications are forwarded on `sender`; the handler answers once
/// the notification is queued, so a slow consumer applies backpressure to
/// BitIndex rather than dropping callbacks.
pub fn create_router(path: &str, secret: Option<String>, sender: mpsc::Sender<WebhookNotification>) -> Router {
    let route = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    };
    let state = WebhookState {
        secret: secret.filter(|s| !s.is_empty()),
        sender,
    };

    Router::new()
        .route(&route, post(receive_notification))
        .with_state(state)
}

async fn receive_notification(
    State(state): State<WebhookState>,
    body: Bytes,
) -> Result<Json<JsonValue>, WebhookError> {
    let notification: WebhookNotification = serde_json::from_slice(&body).map_err(|e| {
        warn!(error:% = e; "Rejected malformed webhook notification");
        WebhookError::InvalidPayload(e.to_string())
    })?;

    if let Some(expected) = &state.secret {
        if !notification.has_secret(expected) {
            warn!(txid = &*notification.txid; "Rejected webhook notification with wrong secret");
            return Err(WebhookError::SecretMismatch);
        }
    }

    let address = mask_string(&notification.address);
    let satoshis = mask_amount(notification.satoshis);
    info!(
        txid = &*notification.txid,
        address = &*address,
        satoshis = &*satoshis,
        confirmations = notification.confirmations;
        "Webhook notification received"
    );

    state
        .sender
        .send(notification)
        .await
        .map_err(|_| WebhookError::ReceiverClosed)?;

    Ok(Json(json!({ "status": "ok" })))
}

/// Serves `router` on `listener` until `shutdown` resolves.
pub async fn serve_webhooks<F>(listener: TcpListener, router: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr().context("Webhook listener has no local address")?;
    let address = local_addr.to_string();
    info!(address = &*address; "Webhook receiver listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Webhook receiver failed")?;

    debug!("Webhook receiver stopped");
    Ok(())
}
