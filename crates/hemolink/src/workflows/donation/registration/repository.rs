use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{DonorId, DonorProfile, RegistrationStatus};
use super::eligibility::EligibilityVerdict;

/// Repository record containing the profile, latest verdict, and status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub profile: DonorProfile,
    pub status: RegistrationStatus,
    pub verdict: Option<EligibilityVerdict>,
}

impl RegistrationRecord {
    pub fn rationale(&self) -> String {
        match &self.verdict {
            Some(verdict) => verdict.summary(),
            None => "pending screening".to_string(),
        }
    }

    pub fn status_view(&self) -> RegistrationStatusView {
        RegistrationStatusView {
            donor_id: self.profile.donor_id.clone(),
            status: self.status.label(),
            rationale: self.rationale(),
            score: self.verdict.as_ref().map(|verdict| verdict.score),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait RegistrationRepository: Send + Sync {
    fn insert(&self, record: RegistrationRecord) -> Result<RegistrationRecord, RepositoryError>;
    fn update(&self, record: RegistrationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &DonorId) -> Result<Option<RegistrationRecord>, RepositoryError>;
    fn pending(&self, limit: usize) -> Result<Vec<RegistrationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound donor messaging hooks (SMS/e-mail adapters).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: DonorNotification) -> Result<(), NotificationError>;
}

/// Notification payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorNotification {
    pub template: String,
    pub donor_id: DonorId,
    pub details: BTreeMap<String, String>,
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Sanitized representation of a registration's exposed status.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationStatusView {
    pub donor_id: DonorId,
    pub status: &'static str,
    pub rationale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}
