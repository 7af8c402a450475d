/// Notification service - per-user inbox with read tracking
use crate::models::{Notification, NotificationKind};
use crate::repository::NotificationStore;
use chrono::Utc;
use krishi_common::{StoreError, StoreResult};
use std::sync::Arc;
use uuid::Uuid;

pub struct NotificationService {
    store: Arc<NotificationStore>,
}

impl NotificationService {
    pub fn new(store: Arc<NotificationStore>) -> Self {
        Self { store }
    }

    /// Deliver a notification to one recipient
    pub fn notify(
        &self,
        recipient_id: Uuid,
        kind: NotificationKind,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> StoreResult<Notification> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(StoreError::InvalidInput("title must not be empty".to_string()));
        }

        let notification = Notification {
            id: Uuid::new_v4(),
            recipient_id,
            kind,
            title,
            body: body.into(),
            read: false,
            created_at: Utc::now(),
        };

        tracing::debug!(
            notification_id = %notification.id,
            recipient = %recipient_id,
            kind = kind.as_str(),
            "notification delivered"
        );
        self.store.insert(notification.clone());
        Ok(notification)
    }

    /// A recipient's inbox, newest first
    pub fn inbox(&self, recipient_id: Uuid, unread_only: bool) -> Vec<Notification> {
        let mut notifications = self.store.snapshot();
        notifications.retain(|n| n.recipient_id == recipient_id && (!unread_only || !n.read));
        notifications
    }

    pub fn unread_count(&self, recipient_id: Uuid) -> usize {
        self.store
            .snapshot()
            .iter()
            .filter(|n| n.recipient_id == recipient_id && !n.read)
            .count()
    }

    /// Mark one notification read. Recipients can only touch their own.
    pub fn mark_read(&self, id: Uuid, recipient_id: Uuid) -> StoreResult<Notification> {
        let result = self.store.with_mut(id, |notification| {
            if notification.recipient_id != recipient_id {
                return Err(StoreError::forbidden(
                    "cannot mark another user's notification read",
                ));
            }
            notification.read = true;
            Ok(notification.clone())
        });

        match result {
            None => Err(StoreError::not_found("notification", id)),
            Some(notification) => notification,
        }
    }

    /// Mark everything read. Returns how many notifications were flipped.
    pub fn mark_all_read(&self, recipient_id: Uuid) -> usize {
        let flipped = self.store.mark_all_read(recipient_id);
        tracing::debug!(recipient = %recipient_id, flipped, "inbox cleared");
        flipped
    }
}
