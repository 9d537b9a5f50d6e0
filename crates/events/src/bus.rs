//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` in the API state. Handlers
//! publish [`SiteEvent`]s and return immediately; subscribers such as the
//! [`LeadDispatcher`](crate::LeadDispatcher) do the slow work.

use chrono::{DateTime, Utc};
use glavtrub_core::types::DbId;
use glavtrub_db::models::lead::Lead;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Everything a notification needs to know about a stored lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadNotice {
    pub lead_id: DbId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub message: String,
    pub page_url: String,
    /// Non-empty UTM tags as `(utm_*, value)` pairs.
    pub utm: Vec<(String, String)>,
    pub submitted_at: DateTime<Utc>,
}

impl From<&Lead> for LeadNotice {
    fn from(lead: &Lead) -> Self {
        Self {
            lead_id: lead.id,
            name: lead.name.clone(),
            phone: lead.phone.clone(),
            email: lead.email.clone(),
            message: lead.message.clone(),
            page_url: lead.page_url.clone(),
            utm: lead
                .utm_params()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            submitted_at: lead.created_at,
        }
    }
}

/// A domain event that occurred on the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SiteEvent {
    /// A visitor submitted the contact form and the lead was stored.
    LeadSubmitted(LeadNotice),
}

impl SiteEvent {
    /// Dot-separated event name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LeadSubmitted(_) => "lead.submitted",
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
pub struct EventBus {
    sender: broadcast::Sender<SiteEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Without subscribers the event is dropped.
    pub fn publish(&self, event: SiteEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SiteEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_notice() -> LeadNotice {
        LeadNotice {
            lead_id: 17,
            name: "Иван".into(),
            phone: "+7 900 000-00-00".into(),
            email: "ivan@example.com".into(),
            message: "Нужна труба 40/32".into(),
            page_url: "/catalog/pnd/pe100/".into(),
            utm: vec![
                ("utm_source".into(), "yandex".into()),
                ("utm_campaign".into(), "pipes".into()),
            ],
            submitted_at: DateTime::parse_from_rfc3339("2025-03-14T09:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[tokio::test]
    async fn every_subscriber_receives_the_event() {
        let bus = EventBus::default();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.publish(SiteEvent::LeadSubmitted(sample_notice()));

        assert_eq!(
            first.recv().await.unwrap(),
            SiteEvent::LeadSubmitted(sample_notice())
        );
        assert_eq!(second.recv().await.unwrap().name(), "lead.submitted");
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::new(4);
        bus.publish(SiteEvent::LeadSubmitted(sample_notice()));
    }

    #[tokio::test]
    async fn slow_receiver_lags() {
        let bus = EventBus::new(1);
        let mut rx = bus.subscribe();
        bus.publish(SiteEvent::LeadSubmitted(sample_notice()));
        bus.publish(SiteEvent::LeadSubmitted(sample_notice()));

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(1))
        ));
    }

    #[test]
    fn event_serializes_with_type_tag() {
        let json = serde_json::to_value(SiteEvent::LeadSubmitted(sample_notice())).unwrap();
        assert_eq!(json["type"], "lead_submitted");
        assert_eq!(json["lead_id"], 17);
    }
}
