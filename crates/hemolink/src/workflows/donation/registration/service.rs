use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::domain::{DonationIntake, DonorId, RegistrationStatus};
use super::eligibility::{EligibilityConfig, EligibilityEngine, EligibilityVerdict};
use super::repository::{
    DonorNotification, NotificationError, NotificationPublisher, RegistrationRecord,
    RegistrationRepository, RepositoryError,
};
use super::screening::{ScreeningGuard, ScreeningViolation};

/// Service composing the screening guard, repository, and eligibility engine.
///
/// Every operation takes an explicit reference date; the service never reads
/// the system clock, so callers (and tests) control "today".
pub struct DonationRegistrationService<R, N> {
    guard: Arc<ScreeningGuard>,
    repository: Arc<R>,
    notifications: Arc<N>,
    engine: Arc<EligibilityEngine>,
}

static DONOR_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_donor_id() -> DonorId {
    let id = DONOR_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    DonorId(format!("donor-{id:06}"))
}

impl<R, N> DonationRegistrationService<R, N>
where
    R: RegistrationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>, config: EligibilityConfig) -> Self {
        Self {
            guard: Arc::new(ScreeningGuard),
            repository,
            notifications,
            engine: Arc::new(EligibilityEngine::new(config)),
        }
    }

    /// Register a new donor, returning the repository-backed record.
    pub fn register(
        &self,
        intake: DonationIntake,
        today: NaiveDate,
    ) -> Result<RegistrationRecord, RegistrationError> {
        let mut profile = self.guard.profile_from_intake(intake, today)?;
        let donor_id = next_donor_id();
        profile.donor_id = donor_id.clone();

        let record = RegistrationRecord {
            profile,
            status: RegistrationStatus::Registered,
            verdict: None,
        };

        let stored = self.repository.insert(record)?;
        info!(donor_id = %donor_id.0, "donor registered");
        Ok(stored)
    }

    /// Assess a registered donor and persist the verdict.
    pub fn assess(
        &self,
        donor_id: &DonorId,
        on: NaiveDate,
    ) -> Result<EligibilityVerdict, RegistrationError> {
        let mut record = self
            .repository
            .fetch(donor_id)?
            .ok_or(RepositoryError::NotFound)?;

        let verdict = self.engine.assess(&record.profile, on);

        record.status = if verdict.eligible {
            RegistrationStatus::Cleared
        } else if verdict.has_disqualifier() {
            RegistrationStatus::Deferred
        } else {
            RegistrationStatus::UnderReview
        };
        record.verdict = Some(verdict.clone());

        self.repository.update(record)?;
        info!(
            donor_id = %donor_id.0,
            score = verdict.score,
            eligible = verdict.eligible,
            "donor assessed"
        );

        if verdict.eligible {
            let mut details = BTreeMap::new();
            details.insert("score".to_string(), verdict.score.to_string());
            self.notifications.publish(DonorNotification {
                template: "donor_cleared".to_string(),
                donor_id: verdict.donor_id.clone(),
                details,
            })?;
        }

        Ok(verdict)
    }

    /// Fetch a registration and current status for API responses.
    pub fn get(&self, donor_id: &DonorId) -> Result<RegistrationRecord, RegistrationError> {
        let record = self
            .repository
            .fetch(donor_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the registration service.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Screening(#[from] ScreeningViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}
