//! Donor intake and eligibility screening for blood donation drives.
//!
//! The library is organized around the donation registration workflow: a
//! screening guard validates inbound intakes, the eligibility engine applies
//! the deferral rulebook, and the registration service ties both to storage
//! and notification seams owned by the embedding application.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
