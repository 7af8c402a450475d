/// Advisory service - crop diagnosis requests and expert consultations
use crate::models::{
    Consultation, ConsultationStatus, Diagnosis, DiagnosisRequest, DiagnosisStatus,
    NewDiagnosisRequest,
};
use crate::repository::AdvisoryStore;
use chrono::{DateTime, Utc};
use krishi_common::{AuthorSnapshot, StoreError, StoreResult, UserType};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct AdvisoryService {
    store: Arc<AdvisoryStore>,
}

impl AdvisoryService {
    pub fn new(store: Arc<AdvisoryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<AdvisoryStore> {
        &self.store
    }

    // ============================================
    // Diagnosis requests
    // ============================================

    /// Submit a crop problem. Only farmers ask for diagnoses.
    pub fn submit_request(
        &self,
        new: NewDiagnosisRequest,
        farmer: AuthorSnapshot,
    ) -> StoreResult<DiagnosisRequest> {
        new.validate()?;
        if farmer.user_type != UserType::Farmer {
            return Err(StoreError::forbidden(
                "only farmers can submit diagnosis requests",
            ));
        }

        let now = Utc::now();
        let request = DiagnosisRequest {
            id: Uuid::new_v4(),
            farmer,
            crop: new.crop,
            symptoms: new.symptoms,
            images: new.images,
            status: DiagnosisStatus::Open,
            diagnosis: None,
            created_at: now,
            updated_at: now,
        };

        tracing::info!(request_id = %request.id, crop = %request.crop, "diagnosis request submitted");
        self.store.insert_request(request.clone());
        Ok(request)
    }

    /// Requests still waiting for an expert, newest first
    pub fn open_requests(&self) -> Vec<DiagnosisRequest> {
        let mut requests = self.store.snapshot_requests();
        requests.retain(|r| r.status == DiagnosisStatus::Open);
        requests
    }

    /// A farmer's own requests regardless of status, newest first
    pub fn requests_by(&self, farmer_id: Uuid) -> Vec<DiagnosisRequest> {
        let mut requests = self.store.snapshot_requests();
        requests.retain(|r| r.farmer.user_id == farmer_id);
        requests
    }

    pub fn get_request(&self, id: Uuid) -> Option<DiagnosisRequest> {
        self.store.get_request(id)
    }

    /// Attach an expert's answer. Only experts answer, and only open
    /// requests can be answered.
    pub fn answer(
        &self,
        id: Uuid,
        expert: AuthorSnapshot,
        advice: impl Into<String>,
    ) -> StoreResult<DiagnosisRequest> {
        if !expert.is_expert() {
            return Err(StoreError::forbidden("only experts can answer diagnosis requests"));
        }
        let advice = advice.into();
        if advice.trim().is_empty() {
            return Err(StoreError::InvalidInput("advice must not be empty".to_string()));
        }

        let result = self.store.with_request_mut(id, |request| {
            if request.status != DiagnosisStatus::Open {
                return Err(StoreError::InvalidTransition(format!(
                    "request is already {}",
                    request.status.as_str()
                )));
            }
            request.diagnosis = Some(Diagnosis {
                expert: expert.clone(),
                advice,
                answered_at: Utc::now(),
            });
            request.status = DiagnosisStatus::Answered;
            request.updated_at = Utc::now();
            Ok(request.clone())
        });

        match result {
            None => Err(StoreError::not_found("diagnosis request", id)),
            Some(Ok(request)) => {
                tracing::info!(request_id = %id, "diagnosis request answered");
                Ok(request)
            }
            Some(err) => err,
        }
    }

    /// Close a request. Only the requester may close; `Closed` is terminal.
    pub fn close(&self, id: Uuid, acting_user: Uuid) -> StoreResult<DiagnosisRequest> {
        let result = self.store.with_request_mut(id, |request| {
            if request.farmer.user_id != acting_user {
                return Err(StoreError::forbidden("only the requester can close a request"));
            }
            if request.status == DiagnosisStatus::Closed {
                return Err(StoreError::InvalidTransition(
                    "request is already closed".to_string(),
                ));
            }
            request.status = DiagnosisStatus::Closed;
            request.updated_at = Utc::now();
            Ok(request.clone())
        });

        match result {
            None => Err(StoreError::not_found("diagnosis request", id)),
            Some(Ok(request)) => {
                tracing::info!(request_id = %id, "diagnosis request closed");
                Ok(request)
            }
            Some(err) => err,
        }
    }

    // ============================================
    // Consultations
    // ============================================

    /// Book a session with a chosen expert
    pub fn request_consultation(
        &self,
        farmer: AuthorSnapshot,
        expert: AuthorSnapshot,
        topic: impl Into<String>,
        scheduled_at: DateTime<Utc>,
    ) -> StoreResult<Consultation> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(StoreError::InvalidInput("topic must not be empty".to_string()));
        }
        if !expert.is_expert() {
            return Err(StoreError::InvalidInput(
                "consultations can only be requested from experts".to_string(),
            ));
        }
        if farmer.user_id == expert.user_id {
            return Err(StoreError::InvalidInput(
                "cannot book a consultation with yourself".to_string(),
            ));
        }

        let now = Utc::now();
        let consultation = Consultation {
            id: Uuid::new_v4(),
            farmer,
            expert,
            topic,
            scheduled_at,
            status: ConsultationStatus::Requested,
            created_at: now,
            updated_at: now,
        };

        tracing::info!(consultation_id = %consultation.id, "consultation requested");
        self.store.insert_consultation(consultation.clone());
        Ok(consultation)
    }

    /// The assigned expert accepts or declines a pending request
    pub fn respond(&self, id: Uuid, expert_user: Uuid, accept: bool) -> StoreResult<Consultation> {
        let decision = if accept {
            ConsultationStatus::Accepted
        } else {
            ConsultationStatus::Declined
        };

        let result = self.store.with_consultation_mut(id, |consultation| {
            if consultation.expert.user_id != expert_user {
                return Err(StoreError::forbidden(
                    "only the assigned expert can respond to a consultation",
                ));
            }
            if consultation.status != ConsultationStatus::Requested {
                return Err(StoreError::InvalidTransition(format!(
                    "consultation is already {}",
                    consultation.status.as_str()
                )));
            }
            consultation.status = decision;
            consultation.updated_at = Utc::now();
            Ok(consultation.clone())
        });

        match result {
            None => Err(StoreError::not_found("consultation", id)),
            Some(Ok(consultation)) => {
                tracing::info!(consultation_id = %id, status = decision.as_str(), "consultation response");
                Ok(consultation)
            }
            Some(err) => err,
        }
    }

    /// Mark an accepted consultation as done
    pub fn complete(&self, id: Uuid, expert_user: Uuid) -> StoreResult<Consultation> {
        let result = self.store.with_consultation_mut(id, |consultation| {
            if consultation.expert.user_id != expert_user {
                return Err(StoreError::forbidden(
                    "only the assigned expert can complete a consultation",
                ));
            }
            if consultation.status != ConsultationStatus::Accepted {
                return Err(StoreError::InvalidTransition(format!(
                    "cannot complete a {} consultation",
                    consultation.status.as_str()
                )));
            }
            consultation.status = ConsultationStatus::Completed;
            consultation.updated_at = Utc::now();
            Ok(consultation.clone())
        });

        match result {
            None => Err(StoreError::not_found("consultation", id)),
            Some(Ok(consultation)) => {
                tracing::info!(consultation_id = %id, "consultation completed");
                Ok(consultation)
            }
            Some(err) => err,
        }
    }

    /// Everything involving a user, as farmer or expert, newest first
    pub fn consultations_for(&self, user_id: Uuid) -> Vec<Consultation> {
        let mut consultations = self.store.snapshot_consultations();
        consultations
            .retain(|c| c.farmer.user_id == user_id || c.expert.user_id == user_id);
        consultations
    }
}
