//! Domain aggregates exposed by the person registry service layer.

pub mod eligibility;
pub mod person;
pub mod search;
pub mod types;
