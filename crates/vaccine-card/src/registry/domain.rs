use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::RuleViolation;

/// Identifier wrapper for registered people.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PersonId(pub u32);

/// Identifier wrapper for vaccine schedules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VaccineId(pub u32);

/// Identifier wrapper for administered-dose events.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VaccinationId(pub u32);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for VaccineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for VaccinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed set of sex categories, exposed to clients as string labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
    Other,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Female, Sex::Male, Sex::Other];

    pub const fn label(self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
            Sex::Other => "other",
        }
    }
}

/// A registered person the ledger can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub age: u32,
    pub sex: Sex,
}

/// Request-supplied person fields; creation assigns the id, update replaces all of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDraft {
    pub name: String,
    pub age: u32,
    pub sex: Sex,
}

/// Dosing rules for one vaccine: primary series size, booster allowance,
/// minimum spacing between doses, and the age at which the first dose
/// becomes eligible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccineSchedule {
    pub id: VaccineId,
    pub name: String,
    pub minimum_age: u32,
    pub dose_interval_months: u32,
    pub recurring: bool,
    pub dose_count: Option<u32>,
    pub has_booster: bool,
    pub booster_count: Option<u32>,
}

impl VaccineSchedule {
    /// Total dose ceiling for this schedule, or `None` when no ceiling
    /// applies (recurring schedules, or a fixed series whose dose count
    /// was cleared after creation).
    pub fn total_doses(&self) -> Option<u32> {
        if self.recurring {
            return None;
        }
        let doses = self.dose_count?;
        let boosters = if self.has_booster {
            self.booster_count.unwrap_or(0)
        } else {
            0
        };
        Some(doses + boosters)
    }
}

/// Request-supplied schedule fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDraft {
    pub name: String,
    pub minimum_age: u32,
    pub dose_interval_months: u32,
    pub recurring: bool,
    pub dose_count: Option<u32>,
    pub has_booster: bool,
    pub booster_count: Option<u32>,
}

impl ScheduleDraft {
    /// Creation invariant: a fixed series needs a positive dose count and a
    /// boostered schedule needs a positive booster count. Checked when a
    /// schedule enters the catalog, not on later updates.
    pub fn validate(&self) -> Result<(), RuleViolation> {
        if !self.recurring && self.dose_count.unwrap_or(0) == 0 {
            return Err(RuleViolation::DoseCountRequired);
        }
        if self.has_booster && self.booster_count.unwrap_or(0) == 0 {
            return Err(RuleViolation::BoosterCountRequired);
        }
        Ok(())
    }
}

/// One administered dose: who, which vaccine, and the calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccinationEvent {
    pub id: VaccinationId,
    pub person_id: PersonId,
    pub vaccine_id: VaccineId,
    pub date: NaiveDate,
}

/// Request-supplied vaccination fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccinationDraft {
    pub person_id: PersonId,
    pub vaccine_id: VaccineId,
    pub date: NaiveDate,
}
