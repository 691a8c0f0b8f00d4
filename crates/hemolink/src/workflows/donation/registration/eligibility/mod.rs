mod config;
mod policy;
mod rules;

pub use config::EligibilityConfig;
pub use policy::{standard_recommendations, EligibilityVerdict};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::DonorProfile;
use policy::build_verdict;

/// Stateless screening engine applying the deferral rulebook to a donor
/// profile.
///
/// Assessment is pure: the same profile and reference date always produce
/// the same verdict, and nothing is cached between calls.
pub struct EligibilityEngine {
    config: EligibilityConfig,
}

impl EligibilityEngine {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    pub fn assess(&self, profile: &DonorProfile, on: NaiveDate) -> EligibilityVerdict {
        let outcome = rules::apply_rulebook(profile, &self.config, on);
        build_verdict(profile.donor_id.clone(), outcome)
    }
}

/// Discrete screening observation, allowing transparent review of a verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub topic: FindingTopic,
    pub severity: Severity,
    pub message: String,
    pub disqualifying: bool,
}

impl Finding {
    /// A hard stop: always `error` severity and disqualifying.
    pub(crate) fn deferral(topic: FindingTopic, message: impl Into<String>) -> Self {
        Self {
            topic,
            severity: Severity::Error,
            message: message.into(),
            disqualifying: true,
        }
    }

    /// A caution that lowers the score without blocking the donation.
    pub(crate) fn advisory(topic: FindingTopic, message: impl Into<String>) -> Self {
        Self {
            topic,
            severity: Severity::Warning,
            message: message.into(),
            disqualifying: false,
        }
    }

    pub(crate) fn note(message: impl Into<String>) -> Self {
        Self {
            topic: FindingTopic::Info,
            severity: Severity::Info,
            message: message.into(),
            disqualifying: false,
        }
    }
}

/// Area of the screening questionnaire a finding relates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingTopic {
    Age,
    Weight,
    Medical,
    Timing,
    Travel,
    Lifestyle,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}
