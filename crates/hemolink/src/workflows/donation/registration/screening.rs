use chrono::NaiveDate;

use super::domain::{DonationIntake, DonorId, DonorProfile};

/// Validation errors raised by the screening guard.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningViolation {
    #[error("donor consent must be recorded before screening")]
    MissingConsent,
    #[error("donor name is required")]
    BlankName,
    #[error("birth date {birth_date} is after the registration date {today}")]
    FutureBirthDate {
        birth_date: NaiveDate,
        today: NaiveDate,
    },
    #[error("recorded weight {weight_kg} kg is not a plausible measurement")]
    ImplausibleWeight { weight_kg: f32 },
    #[error("{field} date {date} is after the registration date {today}")]
    FutureHistoryDate {
        field: &'static str,
        date: NaiveDate,
        today: NaiveDate,
    },
}

const MAX_RECORDED_WEIGHT_KG: f32 = 350.0;

/// Guard responsible for producing sanitized `DonorProfile` instances.
///
/// The eligibility engine downstream is total over its input; anything that
/// would make a verdict meaningless (future dates, unconsented intakes,
/// impossible measurements) is rejected here instead.
#[derive(Debug, Clone, Default)]
pub struct ScreeningGuard;

impl ScreeningGuard {
    /// Convert an inbound intake into a sanitized donor profile.
    pub fn profile_from_intake(
        &self,
        intake: DonationIntake,
        today: NaiveDate,
    ) -> Result<DonorProfile, ScreeningViolation> {
        if !intake.consent_given {
            return Err(ScreeningViolation::MissingConsent);
        }

        let full_name = intake.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(ScreeningViolation::BlankName);
        }

        if intake.birth_date > today {
            return Err(ScreeningViolation::FutureBirthDate {
                birth_date: intake.birth_date,
                today,
            });
        }

        if let Some(weight_kg) = intake.weight_kg {
            if !weight_kg.is_finite() || weight_kg <= 0.0 || weight_kg > MAX_RECORDED_WEIGHT_KG {
                return Err(ScreeningViolation::ImplausibleWeight { weight_kg });
            }
        }

        let history = intake.history;
        for (field, date) in [
            ("surgery", history.recent_surgery_date),
            ("tattoo", history.recent_tattoo_date),
            ("last donation", history.last_donation_date),
        ] {
            if let Some(date) = date {
                if date > today {
                    return Err(ScreeningViolation::FutureHistoryDate { field, date, today });
                }
            }
        }

        Ok(DonorProfile {
            donor_id: DonorId("pending".to_string()),
            full_name,
            birth_date: intake.birth_date,
            weight_kg: intake.weight_kg,
            blood_group: intake.blood_group,
            history,
        })
    }
}
