use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::alert::AlertKind;

const MAX_RETRIES: u32 = 3;
const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Webhook returned status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Webhook unavailable after {retries} retries")]
    Exhausted { retries: u32 },
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        AppError::Notification(e.to_string())
    }
}

/// What the alert matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationSubject {
    Candidate { id: Option<Uuid>, name: String },
    Job {
        id: Option<Uuid>,
        title: String,
        company: Option<String>,
    },
}

/// One message to an alert owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertNotification {
    pub alert_id: Uuid,
    pub owner_id: Uuid,
    pub alert_title: String,
    pub kind: AlertKind,
    pub score: f64,
    pub subject: NotificationSubject,
}

/// Delivery channel for alert hits.
///
/// Carried in `AppState` as `Arc<dyn NotificationDispatcher>`.
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(&self, notification: &AlertNotification) -> Result<(), DispatchError>;

    fn name(&self) -> &'static str;
}

/// Writes hits to the tracing log. Used when no webhook is configured.
pub struct LogDispatcher;

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn dispatch(&self, notification: &AlertNotification) -> Result<(), DispatchError> {
        info!(
            alert_id = %notification.alert_id,
            owner_id = %notification.owner_id,
            kind = notification.kind.as_str(),
            score = notification.score,
            "alert matched: {}",
            notification.alert_title
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// POSTs each notification as JSON to a fixed URL.
/// Retries on 429 and 5xx with exponential backoff.
#[derive(Clone)]
pub struct WebhookDispatcher {
    client: Client,
    url: String,
}

impl WebhookDispatcher {
    pub fn new(url: String) -> Result<Self, DispatchError> {
        let client = Client::builder().timeout(WEBHOOK_TIMEOUT).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl NotificationDispatcher for WebhookDispatcher {
    async fn dispatch(&self, notification: &AlertNotification) -> Result<(), DispatchError> {
        let mut last_error: Option<DispatchError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 500ms, 1s
                let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "Webhook attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&self.url).json(notification).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(DispatchError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                return Ok(());
            }

            let body = response.text().await.unwrap_or_default();
            let rejected = DispatchError::Rejected {
                status: status.as_u16(),
                body,
            };
            if status.as_u16() == 429 || status.is_server_error() {
                last_error = Some(rejected);
                continue;
            }
            return Err(rejected);
        }

        Err(last_error.unwrap_or(DispatchError::Exhausted {
            retries: MAX_RETRIES,
        }))
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}

/// Webhook when a URL is configured, log otherwise.
pub fn dispatcher_from_config(
    webhook_url: Option<&str>,
) -> Result<std::sync::Arc<dyn NotificationDispatcher>, DispatchError> {
    Ok(match webhook_url {
        Some(url) => std::sync::Arc::new(WebhookDispatcher::new(url.to_string())?),
        None => std::sync::Arc::new(LogDispatcher),
    })
}
