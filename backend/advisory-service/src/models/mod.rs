/// Data models for advisory-service
///
/// Farmers submit crop diagnosis requests which experts answer, and book
/// one-on-one consultations with a chosen expert. Both flows are one-way
/// state machines.
use chrono::{DateTime, Utc};
use krishi_common::AuthorSnapshot;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Diagnosis request lifecycle: `Open -> Answered -> Closed`, where the
/// requester may also close an unanswered request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisStatus {
    Open,
    Answered,
    Closed,
}

impl DiagnosisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosisStatus::Open => "open",
            DiagnosisStatus::Answered => "answered",
            DiagnosisStatus::Closed => "closed",
        }
    }
}

/// An expert's answer attached to a diagnosis request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosis {
    pub expert: AuthorSnapshot,
    pub advice: String,
    pub answered_at: DateTime<Utc>,
}

/// Crop problem submitted by a farmer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosisRequest {
    pub id: Uuid,
    pub farmer: AuthorSnapshot,
    pub crop: String,
    pub symptoms: String,
    pub images: Vec<String>,
    pub status: DiagnosisStatus,
    pub diagnosis: Option<Diagnosis>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input payload for a diagnosis request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewDiagnosisRequest {
    #[validate(length(min = 1, max = 80, message = "crop name must be 1-80 characters"))]
    pub crop: String,
    #[validate(length(min = 1, message = "symptoms must not be empty"))]
    pub symptoms: String,
    #[validate(length(max = 5, message = "at most 5 images"))]
    pub images: Vec<String>,
}

/// Consultation lifecycle: `Requested -> Accepted | Declined`, and an
/// accepted consultation may be `Completed`. All transitions one-way.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    Requested,
    Accepted,
    Declined,
    Completed,
}

impl ConsultationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationStatus::Requested => "requested",
            ConsultationStatus::Accepted => "accepted",
            ConsultationStatus::Declined => "declined",
            ConsultationStatus::Completed => "completed",
        }
    }
}

/// Booked session between a farmer and an expert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub id: Uuid,
    pub farmer: AuthorSnapshot,
    pub expert: AuthorSnapshot,
    pub topic: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: ConsultationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(DiagnosisStatus::Answered.as_str(), "answered");
        assert_eq!(ConsultationStatus::Declined.as_str(), "declined");
    }
}
