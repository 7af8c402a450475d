/// Integration tests for the notification inbox
use krishi_common::StoreError;
use notification_service::{NotificationKind, NotificationService, NotificationStore};
use std::sync::Arc;
use uuid::Uuid;

fn service() -> NotificationService {
    NotificationService::new(Arc::new(NotificationStore::new()))
}

#[test]
fn test_inbox_is_per_recipient_and_newest_first() {
    let service = service();
    let karim = Uuid::new_v4();
    let fatema = Uuid::new_v4();

    service
        .notify(karim, NotificationKind::Like, "পছন্দ", "আপনার পোস্টটি পছন্দ হয়েছে")
        .unwrap();
    let latest = service
        .notify(karim, NotificationKind::Contact, "যোগাযোগ", "একজন ক্রেতা যোগাযোগ করেছেন")
        .unwrap();
    service
        .notify(fatema, NotificationKind::System, "স্বাগতম", "কৃষিলিংকে স্বাগতম")
        .unwrap();

    let inbox = service.inbox(karim, false);
    assert_eq!(inbox.len(), 2);
    assert_eq!(inbox[0].id, latest.id, "newest notification must come first");
    assert_eq!(service.inbox(fatema, false).len(), 1);
}

#[test]
fn test_mark_read_and_unread_filter() {
    let service = service();
    let karim = Uuid::new_v4();

    let first = service
        .notify(karim, NotificationKind::Comment, "মন্তব্য", "নতুন মন্তব্য")
        .unwrap();
    service
        .notify(karim, NotificationKind::Like, "পছন্দ", "নতুন লাইক")
        .unwrap();

    assert_eq!(service.unread_count(karim), 2);

    let marked = service.mark_read(first.id, karim).unwrap();
    assert!(marked.read);
    assert_eq!(service.unread_count(karim), 1);
    assert_eq!(service.inbox(karim, true).len(), 1);
    assert_eq!(service.inbox(karim, false).len(), 2);
}

#[test]
fn test_cannot_mark_another_users_notification() {
    let service = service();
    let karim = Uuid::new_v4();

    let notification = service
        .notify(karim, NotificationKind::System, "ঘোষণা", "নতুন ফিচার")
        .unwrap();

    let err = service.mark_read(notification.id, Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, StoreError::Forbidden(_)));
    assert_eq!(service.unread_count(karim), 1);
}

#[test]
fn test_mark_all_read_reports_flipped_count() {
    let service = service();
    let karim = Uuid::new_v4();

    for i in 0..3 {
        service
            .notify(karim, NotificationKind::System, format!("ঘোষণা {}", i), "")
            .unwrap();
    }
    let first = service.inbox(karim, false)[0].id;
    service.mark_read(first, karim).unwrap();

    assert_eq!(service.mark_all_read(karim), 2);
    assert_eq!(service.unread_count(karim), 0);
    // Second pass flips nothing
    assert_eq!(service.mark_all_read(karim), 0);
}

#[test]
fn test_mark_read_unknown_id_is_not_found() {
    let service = service();
    let err = service.mark_read(Uuid::new_v4(), Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn test_empty_title_is_invalid() {
    let service = service();
    let err = service
        .notify(Uuid::new_v4(), NotificationKind::System, "  ", "body")
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput(_)));
}
