use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::RosterImportError;
use crate::workflows::donation::registration::{DonationIntake, MedicalHistory};
use crate::workflows::donation::BloodGroup;

pub(crate) fn parse_intakes<R: Read>(reader: R) -> Result<Vec<DonationIntake>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut intakes = Vec::new();

    for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let line = index + 2; // header occupies line 1
        let row = record?;
        intakes.push(row.into_intake(line)?);
    }

    Ok(intakes)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Full Name")]
    full_name: String,
    #[serde(rename = "Email", default, deserialize_with = "empty_string_as_none")]
    email: Option<String>,
    #[serde(rename = "Birth Date")]
    birth_date: String,
    #[serde(
        rename = "Weight Kg",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    weight_kg: Option<String>,
    #[serde(
        rename = "Blood Group",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    blood_group: Option<String>,
    #[serde(
        rename = "Last Donation",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    last_donation: Option<String>,
    #[serde(rename = "Consent", default, deserialize_with = "empty_string_as_none")]
    consent: Option<String>,
}

impl RosterRow {
    fn into_intake(self, line: usize) -> Result<DonationIntake, RosterImportError> {
        if self.full_name.trim().is_empty() {
            return Err(RosterImportError::MissingName { line });
        }

        let birth_date =
            parse_date(&self.birth_date).ok_or_else(|| RosterImportError::InvalidDate {
                line,
                column: "Birth Date",
                value: self.birth_date.clone(),
            })?;

        let weight_kg = self
            .weight_kg
            .as_deref()
            .map(|raw| {
                raw.parse::<f32>()
                    .map_err(|_| RosterImportError::InvalidWeight {
                        line,
                        value: raw.to_string(),
                    })
            })
            .transpose()?;

        let blood_group = self
            .blood_group
            .as_deref()
            .map(|raw| {
                raw.parse::<BloodGroup>()
                    .map_err(|err| RosterImportError::BloodGroup { line, source: err })
            })
            .transpose()?;

        let last_donation_date = self
            .last_donation
            .as_deref()
            .map(|raw| {
                parse_date(raw).ok_or_else(|| RosterImportError::InvalidDate {
                    line,
                    column: "Last Donation",
                    value: raw.to_string(),
                })
            })
            .transpose()?;

        Ok(DonationIntake {
            full_name: self.full_name,
            email: self.email,
            phone: None,
            birth_date,
            weight_kg,
            blood_group,
            history: MedicalHistory {
                last_donation_date,
                ..MedicalHistory::default()
            },
            consent_given: consent_given(self.consent.as_deref()),
        })
    }
}

fn consent_given(value: Option<&str>) -> bool {
    matches!(
        value.map(|raw| raw.trim().to_ascii_lowercase()).as_deref(),
        Some("yes" | "y" | "true" | "1")
    )
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}
