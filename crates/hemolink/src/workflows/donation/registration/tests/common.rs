use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::donation::registration::domain::{
    DonationIntake, DonorId, DonorProfile, MedicalHistory,
};
use crate::workflows::donation::registration::eligibility::{EligibilityConfig, EligibilityEngine};
use crate::workflows::donation::registration::repository::{
    DonorNotification, NotificationError, NotificationPublisher, RegistrationRecord,
    RegistrationRepository, RepositoryError,
};
use crate::workflows::donation::registration::{
    registration_router, DonationRegistrationService,
};
use crate::workflows::donation::BloodGroup;

/// Fixed reference date so assessments are reproducible.
pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn eligibility_config() -> EligibilityConfig {
    EligibilityConfig::standard()
}

pub(super) fn engine() -> EligibilityEngine {
    EligibilityEngine::new(eligibility_config())
}

/// Healthy mid-thirties donor with a clean questionnaire.
pub(super) fn intake() -> DonationIntake {
    DonationIntake {
        full_name: "Jordan Pike".to_string(),
        email: Some("jordan.pike@example.com".to_string()),
        phone: Some("+1-515-555-0142".to_string()),
        birth_date: date(1991, 6, 12),
        weight_kg: Some(74.0),
        blood_group: Some(BloodGroup::OPositive),
        history: MedicalHistory::default(),
        consent_given: true,
    }
}

pub(super) fn profile(suffix: &str, birth_date: NaiveDate, weight_kg: Option<f32>) -> DonorProfile {
    DonorProfile {
        donor_id: DonorId(format!("donor-{suffix}")),
        full_name: "Jordan Pike".to_string(),
        birth_date,
        weight_kg,
        blood_group: Some(BloodGroup::OPositive),
        history: MedicalHistory::default(),
    }
}

pub(super) fn clean_adult_profile(suffix: &str) -> DonorProfile {
    profile(suffix, date(1991, 6, 12), Some(74.0))
}

pub(super) fn unconsented_intake() -> DonationIntake {
    let mut intake = intake();
    intake.consent_given = false;
    intake
}

pub(super) fn underage_intake() -> DonationIntake {
    let mut intake = intake();
    intake.birth_date = date(2010, 1, 10);
    intake
}

pub(super) fn build_service() -> (
    DonationRegistrationService<MemoryRepository, MemoryNotifications>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifications>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = DonationRegistrationService::new(
        repository.clone(),
        notifications.clone(),
        eligibility_config(),
    );
    (service, repository, notifications)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<DonorId, RegistrationRecord>>>,
}

impl RegistrationRepository for MemoryRepository {
    fn insert(&self, record: RegistrationRecord) -> Result<RegistrationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile.donor_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.profile.donor_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: RegistrationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.profile.donor_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &DonorId) -> Result<Option<RegistrationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, _limit: usize) -> Result<Vec<RegistrationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifications {
    events: Arc<Mutex<Vec<DonorNotification>>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<DonorNotification> {
        self.events.lock().expect("notification mutex poisoned").clone()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, notification: DonorNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct ConflictRepository;

impl RegistrationRepository for ConflictRepository {
    fn insert(&self, _record: RegistrationRecord) -> Result<RegistrationRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: RegistrationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &DonorId) -> Result<Option<RegistrationRecord>, RepositoryError> {
        Ok(None)
    }

    fn pending(&self, _limit: usize) -> Result<Vec<RegistrationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl RegistrationRepository for UnavailableRepository {
    fn insert(&self, _record: RegistrationRecord) -> Result<RegistrationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: RegistrationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &DonorId) -> Result<Option<RegistrationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending(&self, _limit: usize) -> Result<Vec<RegistrationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) fn registration_router_with_service(
    service: DonationRegistrationService<MemoryRepository, MemoryNotifications>,
) -> axum::Router {
    registration_router(Arc::new(service))
}
