//! Domain events published by the license facade.
//!
//! The facade only knows the [`EventNotifier`] trait. [`BroadcastNotifier`]
//! is the in-process implementation: emitting never waits on subscribers and
//! succeeds even when nobody is listening.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;
use uuid::Uuid;

/// A license-related notification for external subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LicenseEvent {
    #[serde(rename_all = "camelCase")]
    CommunityPlusRegistered {
        user_id: Uuid,
        email: String,
        license_key: Option<String>,
    },
    RenewalAttempted { success: bool },
}

impl LicenseEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            LicenseEvent::CommunityPlusRegistered { .. } => "license-community-plus-registered",
            LicenseEvent::RenewalAttempted { .. } => "license-renewal-attempted",
        }
    }

    /// The event body as JSON, without the event name.
    #[must_use]
    pub fn payload(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Fire-and-forget sink for [`LicenseEvent`]s.
pub trait EventNotifier: Send + Sync {
    fn emit(&self, event: LicenseEvent);
}

/// An event as seen by a [`BroadcastNotifier`] subscriber.
#[derive(Debug, Clone)]
pub struct PublishedEvent {
    pub name: &'static str,
    pub payload: Value,
    pub published_at: DateTime<Utc>,
}

/// In-process notifier backed by a `tokio` broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: broadcast::Sender<PublishedEvent>,
}

impl BroadcastNotifier {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

impl EventNotifier for BroadcastNotifier {
    fn emit(&self, event: LicenseEvent) {
        let published = PublishedEvent {
            name: event.name(),
            payload: event.payload(),
            published_at: Utc::now(),
        };
        // Err only means there are no subscribers right now.
        if self.sender.send(published).is_err() {
            tracing::debug!(event = event.name(), "no subscribers for license event");
        }
    }
}
