//! Notification channel
//!
//! Failing checks push a summary to a fixed recipient list through a mail
//! gateway. Delivery is best-effort from the framework's perspective; retry
//! and backoff belong to the gateway.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

use crate::config::NotificationSettings;

/// A message for the notification channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

/// Notification delivery errors
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NotifyError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail gateway rejected the message: HTTP {status}")]
    Gateway { status: u16 },
}

/// Outbound notification delivery
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Delivers notifications as JSON to an HTTP mail gateway.
///
/// A disabled channel accepts and drops every message.
pub struct HttpMailNotifier {
    client: reqwest::Client,
    gateway_url: String,
    enabled: bool,
}

impl HttpMailNotifier {
    pub fn new(settings: &NotificationSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            gateway_url: settings.gateway_url.clone(),
            enabled: settings.enabled,
        }
    }
}

#[async_trait]
impl NotificationChannel for HttpMailNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        if !self.enabled {
            debug!("notification channel disabled, dropping message");
            return Ok(());
        }

        let response = self
            .client
            .post(&self.gateway_url)
            .json(notification)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Gateway {
                status: status.as_u16(),
            });
        }

        debug!(subject = %notification.subject, "notification delivered");
        Ok(())
    }
}

/// Records sent notifications; for tests and development
#[derive(Default)]
pub struct MemoryNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications sent so far, in order
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationChannel for MemoryNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_notifier_records_messages() {
        let notifier = MemoryNotifier::new();
        let notification = Notification {
            from: "checker@example.com".to_string(),
            to: vec!["ops@example.com".to_string()],
            subject: "subject".to_string(),
            body: "body".to_string(),
        };

        notifier.send(&notification).await.unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], notification);
    }

    #[test]
    fn test_notification_serializes_to_mail_payload() {
        let notification = Notification {
            from: "checker@example.com".to_string(),
            to: vec!["ops@example.com".to_string()],
            subject: "subject".to_string(),
            body: "body".to_string(),
        };

        let json = serde_json::to_value(&notification).unwrap();
        assert_eq!(json["from"], "checker@example.com");
        assert_eq!(json["to"][0], "ops@example.com");
        assert_eq!(json["subject"], "subject");
        assert_eq!(json["body"], "body");
    }

    #[tokio::test]
    async fn test_disabled_notifier_drops_silently() {
        let settings = NotificationSettings {
            enabled: false,
            ..NotificationSettings::default()
        };
        let notifier = HttpMailNotifier::new(&settings);

        let notification = Notification {
            from: "checker@example.com".to_string(),
            to: vec![],
            subject: "subject".to_string(),
            body: "body".to_string(),
        };

        // No gateway is reachable in tests; a disabled channel must not try
        notifier.send(&notification).await.unwrap();
    }
}
