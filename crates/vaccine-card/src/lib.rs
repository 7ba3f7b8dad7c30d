//! Vaccination registry: people, vaccine schedules, administered doses, and the
//! eligibility rules that decide whether a new dose may be recorded and which
//! vaccines a person has fallen behind on.

pub mod config;
pub mod error;
pub mod registry;
pub mod telemetry;
