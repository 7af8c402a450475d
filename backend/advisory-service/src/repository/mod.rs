/// In-memory storage for diagnosis requests and consultations
use crate::models::{Consultation, DiagnosisRequest};
use parking_lot::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct AdvisoryStore {
    requests: RwLock<Vec<DiagnosisRequest>>,
    consultations: RwLock<Vec<Consultation>>,
}

impl AdvisoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a new diagnosis request
    pub fn insert_request(&self, request: DiagnosisRequest) {
        self.requests.write().insert(0, request);
    }

    pub fn snapshot_requests(&self) -> Vec<DiagnosisRequest> {
        self.requests.read().clone()
    }

    pub fn get_request(&self, id: Uuid) -> Option<DiagnosisRequest> {
        self.requests.read().iter().find(|r| r.id == id).cloned()
    }

    pub fn with_request_mut<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut DiagnosisRequest) -> R,
    ) -> Option<R> {
        let mut requests = self.requests.write();
        requests.iter_mut().find(|r| r.id == id).map(f)
    }

    pub fn request_count(&self) -> usize {
        self.requests.read().len()
    }

    /// Prepend a new consultation
    pub fn insert_consultation(&self, consultation: Consultation) {
        self.consultations.write().insert(0, consultation);
    }

    pub fn snapshot_consultations(&self) -> Vec<Consultation> {
        self.consultations.read().clone()
    }

    pub fn get_consultation(&self, id: Uuid) -> Option<Consultation> {
        self.consultations.read().iter().find(|c| c.id == id).cloned()
    }

    pub fn with_consultation_mut<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Consultation) -> R,
    ) -> Option<R> {
        let mut consultations = self.consultations.write();
        consultations.iter_mut().find(|c| c.id == id).map(f)
    }
}
