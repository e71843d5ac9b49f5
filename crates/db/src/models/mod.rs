//! Row models for the record store tables.

pub mod caregiver;
pub mod patient;

pub use caregiver::Caregiver;
pub use patient::Patient;
