pub mod donation;
pub mod roster;
