/// Integration tests for diagnosis and consultation state machines
use advisory_service::models::{ConsultationStatus, DiagnosisStatus, NewDiagnosisRequest};
use advisory_service::{AdvisoryService, AdvisoryStore};
use chrono::{Duration, Utc};
use krishi_common::{AuthorSnapshot, StoreError, UserType};
use std::sync::Arc;
use uuid::Uuid;

fn farmer(name: &str) -> AuthorSnapshot {
    AuthorSnapshot::new(Uuid::new_v4(), name, "রংপুর", UserType::Farmer)
}

fn expert(name: &str) -> AuthorSnapshot {
    AuthorSnapshot::new(Uuid::new_v4(), name, "ঢাকা", UserType::Expert).verified()
}

fn service() -> AdvisoryService {
    AdvisoryService::new(Arc::new(AdvisoryStore::new()))
}

fn request(crop: &str) -> NewDiagnosisRequest {
    NewDiagnosisRequest {
        crop: crop.to_string(),
        symptoms: "পাতায় বাদামি দাগ দেখা যাচ্ছে".to_string(),
        images: vec![],
    }
}

#[test]
fn test_submit_and_answer_request() {
    let service = service();
    let submitted = service.submit_request(request("ধান"), farmer("করিম")).unwrap();
    assert_eq!(submitted.status, DiagnosisStatus::Open);
    assert_eq!(service.open_requests().len(), 1);

    let dr = expert("ড. রহমান");
    let answered = service
        .answer(submitted.id, dr.clone(), "ব্লাস্ট রোগ। ট্রাইসাইক্লাজল স্প্রে করুন।")
        .unwrap();

    assert_eq!(answered.status, DiagnosisStatus::Answered);
    assert_eq!(answered.diagnosis.unwrap().expert.user_id, dr.user_id);
    assert!(service.open_requests().is_empty());
}

#[test]
fn test_customer_cannot_submit_request() {
    let service = service();
    let customer = AuthorSnapshot::new(Uuid::new_v4(), "ক্রেতা", "ঢাকা", UserType::Customer);

    let err = service.submit_request(request("ধান"), customer).unwrap_err();
    assert!(matches!(err, StoreError::Forbidden(_)));
}

#[test]
fn test_farmer_cannot_answer_request() {
    let service = service();
    let submitted = service.submit_request(request("ধান"), farmer("করিম")).unwrap();

    let err = service
        .answer(submitted.id, farmer("রহিম"), "আমার মনে হয়...")
        .unwrap_err();
    assert!(matches!(err, StoreError::Forbidden(_)));
}

#[test]
fn test_answered_request_cannot_be_answered_again() {
    let service = service();
    let submitted = service.submit_request(request("ধান"), farmer("করিম")).unwrap();
    service.answer(submitted.id, expert("ড. রহমান"), "পরামর্শ").unwrap();

    let err = service
        .answer(submitted.id, expert("ড. আলম"), "অন্য পরামর্শ")
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidTransition(_)));
}

#[test]
fn test_only_requester_can_close() {
    let service = service();
    let asker = farmer("করিম");
    let submitted = service.submit_request(request("ধান"), asker.clone()).unwrap();

    let err = service.close(submitted.id, Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, StoreError::Forbidden(_)));

    let closed = service.close(submitted.id, asker.user_id).unwrap();
    assert_eq!(closed.status, DiagnosisStatus::Closed);

    let err = service.close(submitted.id, asker.user_id).unwrap_err();
    assert!(matches!(err, StoreError::InvalidTransition(_)));
}

#[test]
fn test_answer_nonexistent_request_is_not_found() {
    let service = service();
    let err = service
        .answer(Uuid::new_v4(), expert("ড. রহমান"), "পরামর্শ")
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
}

#[test]
fn test_consultation_happy_path() {
    let service = service();
    let asker = farmer("করিম");
    let dr = expert("ড. রহমান");

    let consultation = service
        .request_consultation(
            asker.clone(),
            dr.clone(),
            "সবজি চাষে পোকা দমন",
            Utc::now() + Duration::days(2),
        )
        .unwrap();
    assert_eq!(consultation.status, ConsultationStatus::Requested);

    let accepted = service.respond(consultation.id, dr.user_id, true).unwrap();
    assert_eq!(accepted.status, ConsultationStatus::Accepted);

    let completed = service.complete(consultation.id, dr.user_id).unwrap();
    assert_eq!(completed.status, ConsultationStatus::Completed);

    // Both sides see the consultation
    assert_eq!(service.consultations_for(asker.user_id).len(), 1);
    assert_eq!(service.consultations_for(dr.user_id).len(), 1);
}

#[test]
fn test_consultation_with_non_expert_is_invalid() {
    let service = service();
    let err = service
        .request_consultation(
            farmer("করিম"),
            farmer("রহিম"),
            "বিষয়",
            Utc::now() + Duration::days(1),
        )
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput(_)));
}

#[test]
fn test_only_assigned_expert_can_respond() {
    let service = service();
    let dr = expert("ড. রহমান");
    let consultation = service
        .request_consultation(farmer("করিম"), dr, "বিষয়", Utc::now() + Duration::days(1))
        .unwrap();

    let other = expert("ড. আলম");
    let err = service.respond(consultation.id, other.user_id, true).unwrap_err();
    assert!(matches!(err, StoreError::Forbidden(_)));
}

#[test]
fn test_declined_consultation_cannot_be_completed() {
    let service = service();
    let dr = expert("ড. রহমান");
    let consultation = service
        .request_consultation(farmer("করিম"), dr.clone(), "বিষয়", Utc::now() + Duration::days(1))
        .unwrap();

    service.respond(consultation.id, dr.user_id, false).unwrap();

    let err = service.complete(consultation.id, dr.user_id).unwrap_err();
    assert!(matches!(err, StoreError::InvalidTransition(_)));
}

#[test]
fn test_respond_twice_is_invalid_transition() {
    let service = service();
    let dr = expert("ড. রহমান");
    let consultation = service
        .request_consultation(farmer("করিম"), dr.clone(), "বিষয়", Utc::now() + Duration::days(1))
        .unwrap();

    service.respond(consultation.id, dr.user_id, true).unwrap();
    let err = service.respond(consultation.id, dr.user_id, false).unwrap_err();
    assert!(matches!(err, StoreError::InvalidTransition(_)));
}
