use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ABO/Rh blood group of a donor or recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "O-")]
    ONegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "AB+")]
    AbPositive,
}

impl BloodGroup {
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::ONegative,
        BloodGroup::OPositive,
        BloodGroup::ANegative,
        BloodGroup::APositive,
        BloodGroup::BNegative,
        BloodGroup::BPositive,
        BloodGroup::AbNegative,
        BloodGroup::AbPositive,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            BloodGroup::ONegative => "O-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ANegative => "A-",
            BloodGroup::APositive => "A+",
            BloodGroup::BNegative => "B-",
            BloodGroup::BPositive => "B+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::AbPositive => "AB+",
        }
    }

    /// Recipient groups whose red cells are compatible with this donor group.
    pub const fn compatible_recipients(self) -> &'static [BloodGroup] {
        match self {
            BloodGroup::ONegative => &BloodGroup::ALL,
            BloodGroup::OPositive => &[
                BloodGroup::OPositive,
                BloodGroup::APositive,
                BloodGroup::BPositive,
                BloodGroup::AbPositive,
            ],
            BloodGroup::ANegative => &[
                BloodGroup::ANegative,
                BloodGroup::APositive,
                BloodGroup::AbNegative,
                BloodGroup::AbPositive,
            ],
            BloodGroup::APositive => &[BloodGroup::APositive, BloodGroup::AbPositive],
            BloodGroup::BNegative => &[
                BloodGroup::BNegative,
                BloodGroup::BPositive,
                BloodGroup::AbNegative,
                BloodGroup::AbPositive,
            ],
            BloodGroup::BPositive => &[BloodGroup::BPositive, BloodGroup::AbPositive],
            BloodGroup::AbNegative => &[BloodGroup::AbNegative, BloodGroup::AbPositive],
            BloodGroup::AbPositive => &[BloodGroup::AbPositive],
        }
    }

    pub fn can_donate_to(self, recipient: BloodGroup) -> bool {
        self.compatible_recipients().contains(&recipient)
    }

    pub fn can_receive_from(self, donor: BloodGroup) -> bool {
        donor.can_donate_to(self)
    }

    /// Donor groups a recipient of this group can accept.
    pub fn compatible_donors(self) -> Vec<BloodGroup> {
        BloodGroup::ALL
            .into_iter()
            .filter(|donor| donor.can_donate_to(self))
            .collect()
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a blood-group string is not one of the eight ABO/Rh labels.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized blood group '{0}'")]
pub struct UnknownBloodGroup(pub String);

impl FromStr for BloodGroup {
    type Err = UnknownBloodGroup;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "O-" => Ok(BloodGroup::ONegative),
            "O+" => Ok(BloodGroup::OPositive),
            "A-" => Ok(BloodGroup::ANegative),
            "A+" => Ok(BloodGroup::APositive),
            "B-" => Ok(BloodGroup::BNegative),
            "B+" => Ok(BloodGroup::BPositive),
            "AB-" => Ok(BloodGroup::AbNegative),
            "AB+" => Ok(BloodGroup::AbPositive),
            _ => Err(UnknownBloodGroup(value.trim().to_string())),
        }
    }
}
