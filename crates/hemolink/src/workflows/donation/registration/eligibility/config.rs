use serde::{Deserialize, Serialize};

/// Screening thresholds, deferral windows, and keyword lexicons.
///
/// Lexicon entries are lowercase; matching is case-insensitive substring
/// containment against the donor's self-reported answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub min_donor_age: u8,
    pub senior_review_age: u8,
    pub min_weight_kg: f32,
    pub surgery_deferral_days: i64,
    pub tattoo_deferral_days: i64,
    pub donation_interval_days: i64,
    pub serious_conditions: Vec<String>,
    pub flagged_medications: Vec<String>,
    pub restricted_regions: Vec<String>,
}

impl EligibilityConfig {
    /// Rule set used for whole-blood drives.
    pub fn standard() -> Self {
        Self {
            min_donor_age: 18,
            senior_review_age: 65,
            min_weight_kg: 50.0,
            surgery_deferral_days: 30,
            tattoo_deferral_days: 90,
            donation_interval_days: 56,
            serious_conditions: [
                "diabetes",
                "heart disease",
                "cancer",
                "hiv",
                "hepatitis",
            ]
            .map(String::from)
            .to_vec(),
            flagged_medications: ["aspirin", "blood thinner", "anticoagulant"]
                .map(String::from)
                .to_vec(),
            restricted_regions: ["malaria endemic areas", "zika areas"]
                .map(String::from)
                .to_vec(),
        }
    }
}
