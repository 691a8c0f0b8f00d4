use super::common::*;
use crate::workflows::donation::registration::eligibility::{FindingTopic, Severity};
use chrono::Duration;

#[test]
fn clean_adult_is_cleared_with_full_score() {
    let verdict = engine().assess(&clean_adult_profile("clean"), today());

    assert!(verdict.eligible);
    assert_eq!(verdict.score, 100);
    assert_eq!(verdict.findings.len(), 1);
    assert_eq!(verdict.findings[0].topic, FindingTopic::Info);
    assert_eq!(verdict.findings[0].severity, Severity::Info);
    assert!(!verdict.findings[0].disqualifying);
    assert!(verdict.next_eligible_on.is_none());
    assert_eq!(verdict.recommendations.len(), 5);
}

#[test]
fn underage_donor_is_deferred() {
    let profile = profile("underage", date(2010, 1, 10), Some(60.0));

    let verdict = engine().assess(&profile, today());

    assert!(!verdict.eligible);
    assert_eq!(verdict.score, 50);
    assert_eq!(verdict.findings.len(), 1);
    let finding = &verdict.findings[0];
    assert_eq!(finding.topic, FindingTopic::Age);
    assert_eq!(finding.severity, Severity::Error);
    assert!(finding.disqualifying);
}

#[test]
fn senior_donor_passes_with_clearance_advisory() {
    let profile = profile("senior", date(1955, 6, 1), Some(70.0));

    let verdict = engine().assess(&profile, today());

    assert!(verdict.eligible);
    assert_eq!(verdict.score, 90);
    let advisory = &verdict.findings[0];
    assert_eq!(advisory.topic, FindingTopic::Age);
    assert_eq!(advisory.severity, Severity::Warning);
    assert!(!advisory.disqualifying);
}

#[test]
fn low_weight_fails_on_score_alone() {
    let profile = profile("light", date(1991, 6, 12), Some(45.0));

    let verdict = engine().assess(&profile, today());

    // 60 is below the threshold even before the disqualifier is considered.
    assert!(!verdict.eligible);
    assert_eq!(verdict.score, 60);
    assert_eq!(verdict.findings.len(), 1);
    assert_eq!(verdict.findings[0].topic, FindingTopic::Weight);
}

#[test]
fn missing_weight_skips_the_weight_rule() {
    let profile = profile("unweighed", date(1991, 6, 12), None);

    let verdict = engine().assess(&profile, today());

    assert!(verdict.eligible);
    assert_eq!(verdict.score, 100);
}

#[test]
fn recent_donation_sets_next_eligible_date() {
    let mut profile = clean_adult_profile("interval");
    let last_donation = today() - Duration::days(20);
    profile.history.last_donation_date = Some(last_donation);

    let verdict = engine().assess(&profile, today());

    assert!(!verdict.eligible);
    assert_eq!(verdict.score, 60);
    assert_eq!(
        verdict.next_eligible_on,
        Some(last_donation + Duration::days(56))
    );
    let finding = &verdict.findings[0];
    assert_eq!(finding.topic, FindingTopic::Timing);
    assert!(finding.disqualifying);
    assert!(finding.message.contains("2026-04-19"));
}

#[test]
fn elapsed_donation_interval_leaves_no_next_date() {
    let mut profile = clean_adult_profile("interval-ok");
    profile.history.last_donation_date = Some(today() - Duration::days(56));

    let verdict = engine().assess(&profile, today());

    assert!(verdict.eligible);
    assert_eq!(verdict.score, 100);
    assert!(verdict.next_eligible_on.is_none());
}

#[test]
fn recent_tattoo_is_advisory_only() {
    let mut profile = clean_adult_profile("tattoo");
    profile.history.has_recent_tattoo = true;
    profile.history.recent_tattoo_date = Some(today() - Duration::days(10));

    let verdict = engine().assess(&profile, today());

    assert!(verdict.eligible);
    assert_eq!(verdict.score, 85);
    assert_eq!(verdict.findings.len(), 2);
    assert_eq!(verdict.findings[0].topic, FindingTopic::Lifestyle);
    assert_eq!(verdict.findings[0].severity, Severity::Warning);
    assert!(!verdict.findings[0].disqualifying);
    assert_eq!(verdict.findings[1].topic, FindingTopic::Info);
}

#[test]
fn serious_condition_matches_by_substring() {
    let mut profile = clean_adult_profile("chronic");
    profile.history.has_chronic_illness = true;
    profile.history.chronic_illnesses = vec!["Type 2 Diabetes".to_string()];

    let verdict = engine().assess(&profile, today());

    // Score stays at the threshold, but the deferral finding blocks clearance.
    assert!(!verdict.eligible);
    assert_eq!(verdict.score, 70);
    assert_eq!(verdict.findings.len(), 1);
    assert!(verdict.findings[0].disqualifying);
    assert_eq!(verdict.findings[0].topic, FindingTopic::Medical);
}

#[test]
fn unlisted_condition_is_reviewed_not_deferred() {
    let mut profile = clean_adult_profile("allergies");
    profile.history.has_chronic_illness = true;
    profile.history.chronic_illnesses = vec!["Seasonal allergies".to_string()];

    let verdict = engine().assess(&profile, today());

    assert!(verdict.eligible);
    assert_eq!(verdict.score, 95);
    assert_eq!(verdict.findings[0].severity, Severity::Warning);
    assert!(!verdict.findings[0].disqualifying);
}

#[test]
fn flagged_medication_lowers_score_without_deferring() {
    let mut profile = clean_adult_profile("meds");
    profile.history.taking_medications = true;
    profile.history.medications = vec!["Aspirin 81mg daily".to_string()];

    let verdict = engine().assess(&profile, today());

    assert!(verdict.eligible);
    assert_eq!(verdict.score, 90);
}

#[test]
fn recent_surgery_defers_even_above_threshold() {
    let mut profile = clean_adult_profile("surgery");
    profile.history.has_recent_surgery = true;
    profile.history.recent_surgery_date = Some(today() - Duration::days(10));

    let verdict = engine().assess(&profile, today());

    assert!(!verdict.eligible);
    assert_eq!(verdict.score, 75);
    assert!(verdict.findings[0].disqualifying);
    // The thank-you note keys off the score, not the deferral.
    assert_eq!(verdict.findings.last().map(|f| f.topic), Some(FindingTopic::Info));
}

#[test]
fn restricted_travel_is_advisory() {
    let mut profile = clean_adult_profile("travel");
    profile.history.has_recent_travel = true;
    profile.history.recent_travel_destinations = vec!["Malaria endemic areas".to_string()];

    let verdict = engine().assess(&profile, today());

    assert!(verdict.eligible);
    assert_eq!(verdict.score, 80);
    assert_eq!(verdict.findings[0].topic, FindingTopic::Travel);
}

#[test]
fn findings_follow_rule_evaluation_order() {
    let mut profile = profile("ordered", date(1955, 6, 1), Some(70.0));
    profile.history.taking_medications = true;
    profile.history.medications = vec!["blood thinner".to_string()];
    profile.history.has_recent_travel = true;
    profile.history.recent_travel_destinations = vec!["Zika areas".to_string()];

    let verdict = engine().assess(&profile, today());

    let topics: Vec<_> = verdict.findings.iter().map(|f| f.topic).collect();
    assert_eq!(
        topics,
        vec![FindingTopic::Age, FindingTopic::Medical, FindingTopic::Travel]
    );
}

#[test]
fn stacked_deferrals_clamp_the_score_at_zero() {
    let mut profile = profile("stacked", date(2010, 1, 10), Some(45.0));
    profile.history.last_donation_date = Some(today() - Duration::days(5));

    let verdict = engine().assess(&profile, today());

    assert_eq!(verdict.score, 0);
    assert!(!verdict.eligible);
    assert_eq!(verdict.findings.len(), 3);
    assert!(verdict.findings.iter().all(|f| f.disqualifying));
}

#[test]
fn error_severity_always_pairs_with_disqualifying() {
    let mut profile = profile("paired", date(1955, 6, 1), Some(45.0));
    profile.history.has_chronic_illness = true;
    profile.history.chronic_illnesses = vec!["hepatitis b".to_string()];
    profile.history.has_recent_tattoo = true;
    profile.history.recent_tattoo_date = Some(today() - Duration::days(3));

    let verdict = engine().assess(&profile, today());

    for finding in &verdict.findings {
        assert_eq!(
            finding.severity == Severity::Error,
            finding.disqualifying,
            "severity/disqualifying drifted for {:?}",
            finding.topic
        );
    }
}

#[test]
fn assessment_is_deterministic() {
    let mut profile = clean_adult_profile("repeat");
    profile.history.has_recent_tattoo = true;
    profile.history.recent_tattoo_date = Some(today() - Duration::days(30));

    let first = engine().assess(&profile, today());
    let second = engine().assess(&profile, today());

    assert_eq!(first, second);
}

#[test]
fn adding_a_risk_factor_never_raises_the_score() {
    let clean = engine().assess(&clean_adult_profile("baseline"), today());

    let mut risky = clean_adult_profile("risky");
    risky.weight_kg = Some(45.0);
    let verdict = engine().assess(&risky, today());

    assert!(verdict.score < clean.score);
    assert!(!verdict.eligible);
}
