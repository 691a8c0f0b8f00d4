use chrono::{Duration, NaiveDate};

use super::super::domain::DonorProfile;
use super::config::EligibilityConfig;
use super::{Finding, FindingTopic};

pub(crate) const FULL_SCORE: i16 = 100;
pub(crate) const PASSING_SCORE: i16 = 70;

const DAYS_PER_YEAR: f64 = 365.25;

/// One deferral rule: a named predicate over the profile that may contribute
/// a finding, a score penalty, and (for the interval rule) a return date.
struct DeferralRule {
    name: &'static str,
    check: fn(&DonorProfile, &EligibilityConfig, NaiveDate) -> Option<RuleHit>,
}

struct RuleHit {
    finding: Finding,
    penalty: i16,
    next_eligible_on: Option<NaiveDate>,
}

impl RuleHit {
    fn new(finding: Finding, penalty: i16) -> Self {
        Self {
            finding,
            penalty,
            next_eligible_on: None,
        }
    }
}

/// Evaluation order is the order findings appear in the verdict.
const RULEBOOK: &[DeferralRule] = &[
    DeferralRule {
        name: "age",
        check: age_rule,
    },
    DeferralRule {
        name: "weight",
        check: weight_rule,
    },
    DeferralRule {
        name: "chronic_illness",
        check: chronic_illness_rule,
    },
    DeferralRule {
        name: "medication",
        check: medication_rule,
    },
    DeferralRule {
        name: "surgery",
        check: surgery_rule,
    },
    DeferralRule {
        name: "tattoo",
        check: tattoo_rule,
    },
    DeferralRule {
        name: "donation_interval",
        check: donation_interval_rule,
    },
    DeferralRule {
        name: "travel",
        check: travel_rule,
    },
];

pub(crate) struct RulebookOutcome {
    pub(crate) findings: Vec<Finding>,
    pub(crate) score: i16,
    pub(crate) next_eligible_on: Option<NaiveDate>,
}

/// Walk every rule in order; rules never short-circuit, so penalties stack.
pub(crate) fn apply_rulebook(
    profile: &DonorProfile,
    config: &EligibilityConfig,
    on: NaiveDate,
) -> RulebookOutcome {
    let mut findings = Vec::new();
    let mut score = FULL_SCORE;
    let mut next_eligible_on = None;

    for rule in RULEBOOK {
        if let Some(hit) = (rule.check)(profile, config, on) {
            tracing::debug!(rule = rule.name, penalty = hit.penalty, "deferral rule hit");
            score -= hit.penalty;
            if hit.next_eligible_on.is_some() {
                next_eligible_on = hit.next_eligible_on;
            }
            findings.push(hit.finding);
        }
    }

    // The thank-you note keys off the running score before it is clamped.
    if score > PASSING_SCORE {
        findings.push(Finding::note(
            "You appear to be a strong candidate. Thank you for donating!",
        ));
    }

    RulebookOutcome {
        findings,
        score,
        next_eligible_on,
    }
}

fn age_on(birth_date: NaiveDate, on: NaiveDate) -> i64 {
    let days = (on - birth_date).num_days();
    (days as f64 / DAYS_PER_YEAR).floor() as i64
}

fn days_since(date: NaiveDate, on: NaiveDate) -> i64 {
    (on - date).num_days()
}

fn matches_lexicon(entries: &[String], lexicon: &[String]) -> bool {
    entries.iter().any(|entry| {
        let entry = entry.to_lowercase();
        lexicon.iter().any(|term| entry.contains(term.as_str()))
    })
}

fn age_rule(profile: &DonorProfile, config: &EligibilityConfig, on: NaiveDate) -> Option<RuleHit> {
    let age = age_on(profile.birth_date, on);

    if age < config.min_donor_age as i64 {
        return Some(RuleHit::new(
            Finding::deferral(
                FindingTopic::Age,
                format!("Donors must be at least {} years old", config.min_donor_age),
            ),
            50,
        ));
    }

    if age > config.senior_review_age as i64 {
        return Some(RuleHit::new(
            Finding::advisory(
                FindingTopic::Age,
                format!(
                    "Donors over {} need medical clearance before donating",
                    config.senior_review_age
                ),
            ),
            10,
        ));
    }

    None
}

fn weight_rule(
    profile: &DonorProfile,
    config: &EligibilityConfig,
    _on: NaiveDate,
) -> Option<RuleHit> {
    let weight_kg = profile.weight_kg?;
    if weight_kg < config.min_weight_kg {
        return Some(RuleHit::new(
            Finding::deferral(
                FindingTopic::Weight,
                format!(
                    "Minimum safe donation weight is {} kg",
                    config.min_weight_kg
                ),
            ),
            40,
        ));
    }

    None
}

fn chronic_illness_rule(
    profile: &DonorProfile,
    config: &EligibilityConfig,
    _on: NaiveDate,
) -> Option<RuleHit> {
    let history = &profile.history;
    if !history.has_chronic_illness || history.chronic_illnesses.is_empty() {
        return None;
    }

    if matches_lexicon(&history.chronic_illnesses, &config.serious_conditions) {
        return Some(RuleHit::new(
            Finding::deferral(
                FindingTopic::Medical,
                "A reported condition requires a medical evaluation before donating",
            ),
            30,
        ));
    }

    Some(RuleHit::new(
        Finding::advisory(
            FindingTopic::Medical,
            "Reported medical history will be reviewed by screening staff",
        ),
        5,
    ))
}

fn medication_rule(
    profile: &DonorProfile,
    config: &EligibilityConfig,
    _on: NaiveDate,
) -> Option<RuleHit> {
    let history = &profile.history;
    if !history.taking_medications || history.medications.is_empty() {
        return None;
    }

    if matches_lexicon(&history.medications, &config.flagged_medications) {
        return Some(RuleHit::new(
            Finding::advisory(
                FindingTopic::Medical,
                "A listed medication may affect eligibility",
            ),
            10,
        ));
    }

    None
}

fn surgery_rule(
    profile: &DonorProfile,
    config: &EligibilityConfig,
    on: NaiveDate,
) -> Option<RuleHit> {
    let history = &profile.history;
    if !history.has_recent_surgery {
        return None;
    }
    let surgery_date = history.recent_surgery_date?;

    if days_since(surgery_date, on) < config.surgery_deferral_days {
        return Some(RuleHit::new(
            Finding::deferral(
                FindingTopic::Medical,
                format!(
                    "Donors must wait {} days after surgery",
                    config.surgery_deferral_days
                ),
            ),
            25,
        ));
    }

    None
}

fn tattoo_rule(
    profile: &DonorProfile,
    config: &EligibilityConfig,
    on: NaiveDate,
) -> Option<RuleHit> {
    let history = &profile.history;
    if !history.has_recent_tattoo {
        return None;
    }
    let tattoo_date = history.recent_tattoo_date?;

    if days_since(tattoo_date, on) < config.tattoo_deferral_days {
        return Some(RuleHit::new(
            Finding::advisory(
                FindingTopic::Lifestyle,
                "A three-month waiting period may apply after a recent tattoo",
            ),
            15,
        ));
    }

    None
}

fn donation_interval_rule(
    profile: &DonorProfile,
    config: &EligibilityConfig,
    on: NaiveDate,
) -> Option<RuleHit> {
    let last_donation = profile.history.last_donation_date?;

    if days_since(last_donation, on) < config.donation_interval_days {
        let next_eligible_on = last_donation + Duration::days(config.donation_interval_days);
        let mut hit = RuleHit::new(
            Finding::deferral(
                FindingTopic::Timing,
                format!(
                    "Donors must wait {} days between whole blood donations; next eligible on {}",
                    config.donation_interval_days,
                    next_eligible_on.format("%Y-%m-%d")
                ),
            ),
            40,
        );
        hit.next_eligible_on = Some(next_eligible_on);
        return Some(hit);
    }

    None
}

fn travel_rule(
    profile: &DonorProfile,
    config: &EligibilityConfig,
    _on: NaiveDate,
) -> Option<RuleHit> {
    let history = &profile.history;
    if !history.has_recent_travel || history.recent_travel_destinations.is_empty() {
        return None;
    }

    if matches_lexicon(&history.recent_travel_destinations, &config.restricted_regions) {
        return Some(RuleHit::new(
            Finding::advisory(
                FindingTopic::Travel,
                "Recent travel to a restricted region may require a waiting period",
            ),
            20,
        ));
    }

    None
}
