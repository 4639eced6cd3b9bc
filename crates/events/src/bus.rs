//! In-process notification bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`NotificationBus`] is the publish/subscribe hub for RSVP
//! [`Notification`]s. It is designed to be shared via `Arc<NotificationBus>`
//! across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use gather_core::types::{EventId, TrackId, UserId};

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// Well-known notification kinds published by the admission orchestrator.
pub const RSVP_ATTENDING: &str = "rsvp.attending";
pub const RSVP_WAITLISTED: &str = "rsvp.waitlisted";
pub const RSVP_CANCELLED: &str = "rsvp.cancelled";

/// A notification about an attendee's RSVP.
///
/// Constructed via [`Notification::new`] and enriched with the builder
/// methods [`with_track`](Notification::with_track) and
/// [`with_payload`](Notification::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Dot-separated kind, e.g. `"rsvp.attending"`.
    pub kind: String,

    /// The attendee the notification concerns.
    pub user_id: UserId,

    /// The event the RSVP belongs to.
    pub event_id: EventId,

    /// The track involved, when the transition concerned one.
    pub track_id: Option<TrackId>,

    /// Free-form JSON payload carrying kind-specific data.
    pub payload: serde_json::Value,

    /// When the notification was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Create a notification with the required fields.
    pub fn new(kind: impl Into<String>, user_id: UserId, event_id: EventId) -> Self {
        Self {
            kind: kind.into(),
            user_id,
            event_id,
            track_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the track the transition concerned.
    pub fn with_track(mut self, track_id: TrackId) -> Self {
        self.track_id = Some(track_id);
        self
    }

    /// Set the JSON payload.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// NotificationBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out notification bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`Notification`].
pub struct NotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl NotificationBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are
    /// dropped and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notification to all current subscribers.
    ///
    /// If there are no active subscribers the notification is silently
    /// dropped -- delivery is fire-and-forget and never fails the caller.
    pub fn publish(&self, notification: Notification) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.sender.send(notification);
    }

    /// Subscribe to all notifications published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn subscribers_receive_published_notifications() {
        let bus = NotificationBus::default();
        let mut rx = bus.subscribe();

        let user_id = Uuid::new_v4();
        let event_id = Uuid::new_v4();
        bus.publish(Notification::new(RSVP_ATTENDING, user_id, event_id));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.kind, RSVP_ATTENDING);
        assert_eq!(received.user_id, user_id);
        assert_eq!(received.event_id, event_id);
        assert_eq!(received.track_id, None);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_no_op() {
        let bus = NotificationBus::default();
        // Must not panic or error.
        bus.publish(Notification::new(
            RSVP_CANCELLED,
            Uuid::new_v4(),
            Uuid::new_v4(),
        ));
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn builder_methods_attach_track_and_payload() {
        let track_id = Uuid::new_v4();
        let n = Notification::new(RSVP_WAITLISTED, Uuid::new_v4(), Uuid::new_v4())
            .with_track(track_id)
            .with_payload(serde_json::json!({ "position": 3 }));

        assert_eq!(n.track_id, Some(track_id));
        assert_eq!(n.payload["position"], 3);
    }
}
