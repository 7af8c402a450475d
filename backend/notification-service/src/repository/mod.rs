/// In-memory storage for notifications
use crate::models::Notification;
use parking_lot::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct NotificationStore {
    notifications: RwLock<Vec<Notification>>,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a new notification
    pub fn insert(&self, notification: Notification) {
        self.notifications.write().insert(0, notification);
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.notifications.read().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Notification> {
        self.notifications.read().iter().find(|n| n.id == id).cloned()
    }

    pub fn with_mut<R>(&self, id: Uuid, f: impl FnOnce(&mut Notification) -> R) -> Option<R> {
        let mut notifications = self.notifications.write();
        notifications.iter_mut().find(|n| n.id == id).map(f)
    }

    /// Mark every unread notification for a recipient read.
    /// Returns how many were flipped.
    pub fn mark_all_read(&self, recipient_id: Uuid) -> usize {
        let mut notifications = self.notifications.write();
        let mut flipped = 0;
        for notification in notifications
            .iter_mut()
            .filter(|n| n.recipient_id == recipient_id && !n.read)
        {
            notification.read = true;
            flipped += 1;
        }
        flipped
    }
}
