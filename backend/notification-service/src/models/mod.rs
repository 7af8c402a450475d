/// Data models for notification-service
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notification type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone liked a post or comment
    Like,
    /// Someone commented on a post
    Comment,
    /// A buyer contacted a listing
    Contact,
    /// An expert answered a diagnosis request
    DiagnosisAnswered,
    /// A consultation was requested, accepted, or declined
    Consultation,
    /// System announcement
    System,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Like => "like",
            NotificationKind::Comment => "comment",
            NotificationKind::Contact => "contact",
            NotificationKind::DiagnosisAnswered => "diagnosis_answered",
            NotificationKind::Consultation => "consultation",
            NotificationKind::System => "system",
        }
    }
}

/// A single inbox entry for one recipient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_as_str() {
        assert_eq!(NotificationKind::DiagnosisAnswered.as_str(), "diagnosis_answered");
        assert_eq!(NotificationKind::System.as_str(), "system");
    }
}
