//! Import of drive-roster CSV exports into donation intakes.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::workflows::donation::blood::UnknownBloodGroup;
use crate::workflows::donation::registration::DonationIntake;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingName {
        line: usize,
    },
    InvalidDate {
        line: usize,
        column: &'static str,
        value: String,
    },
    InvalidWeight {
        line: usize,
        value: String,
    },
    BloodGroup {
        line: usize,
        source: UnknownBloodGroup,
    },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::MissingName { line } => {
                write!(f, "roster line {}: donor name is blank", line)
            }
            RosterImportError::InvalidDate {
                line,
                column,
                value,
            } => write!(
                f,
                "roster line {}: '{}' is not a valid date for {}",
                line, value, column
            ),
            RosterImportError::InvalidWeight { line, value } => {
                write!(f, "roster line {}: '{}' is not a valid weight", line, value)
            }
            RosterImportError::BloodGroup { line, source } => {
                write!(f, "roster line {}: {}", line, source)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::BloodGroup { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<DonationIntake>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<DonationIntake>, RosterImportError> {
        let intakes = parser::parse_intakes(reader)?;
        tracing::debug!(count = intakes.len(), "roster parsed");
        Ok(intakes)
    }
}
