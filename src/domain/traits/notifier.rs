use crate::domain::entities::NotificationEvent;

/// Best-effort sink for observer notifications. Publishing never waits and
/// never fails from the caller's point of view.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: NotificationEvent);
}
