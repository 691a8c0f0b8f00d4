use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::domain::DonorId;
use super::rules::{RulebookOutcome, FULL_SCORE, PASSING_SCORE};
use super::Finding;

/// Screening verdict for a single donor on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub donor_id: DonorId,
    pub eligible: bool,
    pub score: u8,
    pub findings: Vec<Finding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_eligible_on: Option<NaiveDate>,
    pub recommendations: Vec<String>,
}

impl EligibilityVerdict {
    pub fn summary(&self) -> String {
        if self.eligible {
            return format!("cleared to donate (score {})", self.score);
        }

        match self.findings.iter().find(|finding| finding.disqualifying) {
            Some(finding) => format!("deferred: {}", finding.message),
            None => format!("below screening threshold (score {})", self.score),
        }
    }

    pub fn has_disqualifier(&self) -> bool {
        self.findings.iter().any(|finding| finding.disqualifying)
    }
}

pub(crate) fn build_verdict(donor_id: DonorId, outcome: RulebookOutcome) -> EligibilityVerdict {
    let RulebookOutcome {
        findings,
        score,
        next_eligible_on,
    } = outcome;

    let disqualified = findings.iter().any(|finding| finding.disqualifying);
    let score = score.clamp(0, FULL_SCORE);

    EligibilityVerdict {
        donor_id,
        eligible: score >= PASSING_SCORE && !disqualified,
        score: score as u8,
        findings,
        next_eligible_on,
        recommendations: standard_recommendations(),
    }
}

/// Pre-donation guidance attached to every verdict, regardless of outcome.
pub fn standard_recommendations() -> Vec<String> {
    [
        "Eat a healthy meal two to three hours before donating",
        "Drink plenty of water before and after your donation",
        "Get a full night's sleep before your appointment",
        "Avoid alcohol for 24 hours before donating",
        "Bring a photo ID to your appointment",
    ]
    .map(String::from)
    .to_vec()
}
