use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::BufferId;
use crate::types::Size;

/// Buffer lifecycle notifications, fanned out to anyone interested
/// (the editor bridge, tests, the host's status log).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    BufferCreated(BufferId),
    BufferResized { id: BufferId, size: Size },
    BufferUpdated(BufferId),
    BufferDestroyed(BufferId),
    Shutdown,
    #[serde(other)]
    Unknown,
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Returns the number of subscribers that saw the event.
    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(Event::BufferCreated(BufferId::from("b1")));

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::BufferCreated(ref id) if id.as_str() == "b1"));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Event::Shutdown);

        assert!(matches!(rx1.recv().await.unwrap(), Event::Shutdown));
        assert!(matches!(rx2.recv().await.unwrap(), Event::Shutdown));
    }

    #[tokio::test]
    async fn lifecycle_events_arrive_in_order() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let id = BufferId::from("b1");

        bus.publish(Event::BufferCreated(id.clone()));
        bus.publish(Event::BufferResized {
            id: id.clone(),
            size: Size::new(1024, 768),
        });
        bus.publish(Event::BufferUpdated(id.clone()));
        bus.publish(Event::BufferDestroyed(id.clone()));

        assert!(matches!(rx.recv().await.unwrap(), Event::BufferCreated(_)));
        let resized = rx.recv().await.unwrap();
        assert!(
            matches!(resized, Event::BufferResized { ref size, .. } if *size == Size::new(1024, 768))
        );
        assert!(matches!(rx.recv().await.unwrap(), Event::BufferUpdated(_)));
        assert!(matches!(rx.recv().await.unwrap(), Event::BufferDestroyed(ref d) if *d == id));
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        assert_eq!(bus.publish(Event::Shutdown), 0);
    }

    #[test]
    fn publish_returns_subscriber_count() {
        let bus = EventBus::new(16);
        let _rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();

        assert_eq!(bus.publish(Event::Shutdown), 2);
    }

    #[test]
    fn cloned_bus_shares_subscribers() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();
        let clone = bus.clone();

        clone.publish(Event::BufferUpdated(BufferId::from("x")));
        assert!(matches!(rx.try_recv().unwrap(), Event::BufferUpdated(_)));
    }

    #[test]
    fn event_json_shape() {
        let json = serde_json::to_string(&Event::BufferDestroyed(BufferId::from("b1"))).unwrap();
        assert_eq!(json, r#"{"type":"BufferDestroyed","data":"b1"}"#);
    }

    #[test]
    fn unknown_event_deserializes() {
        let json = r#"{"type":"SomeNewEventWeNeverHeardOf","data":null}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(matches!(event, Event::Unknown));
    }
}
