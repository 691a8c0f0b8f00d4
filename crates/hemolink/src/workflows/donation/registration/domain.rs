use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::donation::BloodGroup;

/// Identifier wrapper for registered donors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DonorId(pub String);

/// Raw intake captured at a drive or through the public registration form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationIntake {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub weight_kg: Option<f32>,
    #[serde(default)]
    pub blood_group: Option<BloodGroup>,
    #[serde(default)]
    pub history: MedicalHistory,
    pub consent_given: bool,
}

/// Self-reported medical history answers collected uniformly from donors.
///
/// A `false` flag means the donor answered "no"; the paired detail fields are
/// only consulted when the flag is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicalHistory {
    #[serde(default)]
    pub has_chronic_illness: bool,
    #[serde(default)]
    pub chronic_illnesses: Vec<String>,
    #[serde(default)]
    pub taking_medications: bool,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub has_recent_surgery: bool,
    #[serde(default)]
    pub recent_surgery_date: Option<NaiveDate>,
    #[serde(default)]
    pub has_recent_tattoo: bool,
    #[serde(default)]
    pub recent_tattoo_date: Option<NaiveDate>,
    #[serde(default)]
    pub has_recent_travel: bool,
    #[serde(default)]
    pub recent_travel_destinations: Vec<String>,
    #[serde(default)]
    pub last_donation_date: Option<NaiveDate>,
}

/// The sanitized donor record produced by the screening guard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonorProfile {
    pub donor_id: DonorId,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub weight_kg: Option<f32>,
    pub blood_group: Option<BloodGroup>,
    pub history: MedicalHistory,
}

/// High level status tracked throughout the registration workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationStatus {
    Registered,
    Cleared,
    Deferred,
    UnderReview,
}

impl RegistrationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            RegistrationStatus::Registered => "registered",
            RegistrationStatus::Cleared => "cleared",
            RegistrationStatus::Deferred => "deferred",
            RegistrationStatus::UnderReview => "under_review",
        }
    }
}
