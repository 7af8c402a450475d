pub mod models;
pub mod repository;
pub mod services;

pub use models::{
    Consultation, ConsultationStatus, Diagnosis, DiagnosisRequest, DiagnosisStatus,
    NewDiagnosisRequest,
};
pub use repository::AdvisoryStore;
pub use services::AdvisoryService;
