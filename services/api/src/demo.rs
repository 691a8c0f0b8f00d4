use crate::infra::{
    default_eligibility_config, parse_date, InMemoryNotificationPublisher,
    InMemoryRegistrationRepository,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use hemolink::error::AppError;
use hemolink::workflows::donation::registration::{
    DonationIntake, DonationRegistrationService, DonorId, DonorProfile, EligibilityEngine,
    EligibilityVerdict, MedicalHistory,
};
use hemolink::workflows::donation::BloodGroup;
use hemolink::workflows::roster::RosterImporter;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Donor birth date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) birth_date: NaiveDate,
    /// Donor weight in kilograms
    #[arg(long)]
    pub(crate) weight_kg: Option<f32>,
    /// Donor blood group (e.g. O-, AB+)
    #[arg(long, value_parser = parse_blood_group)]
    pub(crate) blood_group: Option<BloodGroup>,
    /// Date of the donor's most recent whole blood donation
    #[arg(long, value_parser = parse_date)]
    pub(crate) last_donation: Option<NaiveDate>,
    /// Date of a recent surgery, if any
    #[arg(long, value_parser = parse_date)]
    pub(crate) surgery_date: Option<NaiveDate>,
    /// Date of a recent tattoo or piercing, if any
    #[arg(long, value_parser = parse_date)]
    pub(crate) tattoo_date: Option<NaiveDate>,
    /// Comma-separated chronic conditions reported by the donor
    #[arg(long, value_delimiter = ',')]
    pub(crate) conditions: Vec<String>,
    /// Comma-separated current medications
    #[arg(long, value_delimiter = ',')]
    pub(crate) medications: Vec<String>,
    /// Comma-separated recent travel destinations
    #[arg(long, value_delimiter = ',')]
    pub(crate) travel: Vec<String>,
    /// Assessment date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) on: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional roster CSV export to register in bulk
    #[arg(long)]
    pub(crate) roster_csv: Option<PathBuf>,
    /// Override the reference date for registration and assessment
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

fn parse_blood_group(raw: &str) -> Result<BloodGroup, String> {
    raw.parse::<BloodGroup>().map_err(|err| err.to_string())
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let on = args.on.unwrap_or_else(|| Local::now().date_naive());

    let profile = DonorProfile {
        donor_id: DonorId("cli".to_string()),
        full_name: "CLI assessment".to_string(),
        birth_date: args.birth_date,
        weight_kg: args.weight_kg,
        blood_group: args.blood_group,
        history: MedicalHistory {
            has_chronic_illness: !args.conditions.is_empty(),
            chronic_illnesses: args.conditions,
            taking_medications: !args.medications.is_empty(),
            medications: args.medications,
            has_recent_surgery: args.surgery_date.is_some(),
            recent_surgery_date: args.surgery_date,
            has_recent_tattoo: args.tattoo_date.is_some(),
            recent_tattoo_date: args.tattoo_date,
            has_recent_travel: !args.travel.is_empty(),
            recent_travel_destinations: args.travel,
            last_donation_date: args.last_donation,
        },
    };

    let engine = EligibilityEngine::new(default_eligibility_config());
    let verdict = engine.assess(&profile, on);
    render_verdict(&verdict, on);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    println!("Donor intake demo ({today})");
    let repository = Arc::new(InMemoryRegistrationRepository::default());
    let notifications = Arc::new(InMemoryNotificationPublisher::default());
    let service = Arc::new(DonationRegistrationService::new(
        repository,
        notifications.clone(),
        default_eligibility_config(),
    ));

    let mut intakes = sample_intakes(today);
    if let Some(path) = args.roster_csv {
        let imported = RosterImporter::from_path(path)?;
        println!("- Imported {} roster rows", imported.len());
        intakes.extend(imported);
    }

    for intake in intakes {
        let name = intake.full_name.clone();
        let record = match service.register(intake, today) {
            Ok(record) => record,
            Err(err) => {
                println!("- {name}: intake rejected ({err})");
                continue;
            }
        };

        match service.assess(&record.profile.donor_id, today) {
            Ok(verdict) => println!(
                "- {name} [{}]: {}",
                record.profile.donor_id.0,
                verdict.summary()
            ),
            Err(err) => println!("- {name}: assessment unavailable ({err})"),
        }
    }

    let cleared = notifications.events().len();
    println!("Cleared donors notified: {cleared}");

    Ok(())
}

fn render_verdict(verdict: &EligibilityVerdict, on: NaiveDate) {
    println!("Assessment for {on}: {}", verdict.summary());
    println!("Findings:");
    for finding in &verdict.findings {
        println!(
            "  - [{:?}/{:?}] {}",
            finding.topic, finding.severity, finding.message
        );
    }
    if let Some(next) = verdict.next_eligible_on {
        println!("Next eligible on: {next}");
    }
    println!("Before you donate:");
    for recommendation in &verdict.recommendations {
        println!("  - {recommendation}");
    }
}

fn sample_intakes(today: NaiveDate) -> Vec<DonationIntake> {
    let thirty_five_years = chrono::Duration::days(35 * 365 + 120);
    let twenty_nine_years = chrono::Duration::days(29 * 365 + 200);

    vec![
        DonationIntake {
            full_name: "Jordan Pike".to_string(),
            email: Some("jordan.pike@example.com".to_string()),
            phone: None,
            birth_date: today - thirty_five_years,
            weight_kg: Some(74.0),
            blood_group: Some(BloodGroup::OPositive),
            history: MedicalHistory::default(),
            consent_given: true,
        },
        DonationIntake {
            full_name: "Amara Sol".to_string(),
            email: Some("amara.sol@example.com".to_string()),
            phone: None,
            birth_date: today - twenty_nine_years,
            weight_kg: Some(68.0),
            blood_group: Some(BloodGroup::ANegative),
            history: MedicalHistory {
                last_donation_date: Some(today - chrono::Duration::days(21)),
                ..MedicalHistory::default()
            },
            consent_given: true,
        },
    ]
}
