//! Donor registration intake, eligibility screening, and status tracking.
//!
//! Intakes pass through the screening guard before they reach storage, and
//! the eligibility engine is only ever handed sanitized profiles. Storage and
//! donor messaging are trait seams so the embedding service chooses its own
//! adapters.

pub mod domain;
pub(crate) mod eligibility;
pub mod repository;
pub mod router;
pub(crate) mod screening;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    DonationIntake, DonorId, DonorProfile, MedicalHistory, RegistrationStatus,
};
pub use eligibility::{
    standard_recommendations, EligibilityConfig, EligibilityEngine, EligibilityVerdict, Finding,
    FindingTopic, Severity,
};
pub use repository::{
    DonorNotification, NotificationError, NotificationPublisher, RegistrationRecord,
    RegistrationRepository, RegistrationStatusView, RepositoryError,
};
pub use router::{registration_router, AssessmentRequest, RegistrationRequest};
pub use screening::{ScreeningGuard, ScreeningViolation};
pub use service::{DonationRegistrationService, RegistrationError};
