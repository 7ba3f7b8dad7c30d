//! Dose-eligibility rules applied before a vaccination is recorded, and the
//! overdue check that cross-references the catalog against a person's history.

use chrono::{Months, NaiveDate};

use super::super::domain::{Person, VaccinationEvent, VaccineSchedule};
use super::super::error::RuleViolation;

/// Earliest date on which the next dose may be registered, given the latest
/// prior dose. Calendar-month arithmetic, clamping at the end of shorter
/// months (Jan 31 + 1 month = Feb 28/29).
pub(crate) fn next_eligible_date(last_dose: NaiveDate, interval_months: u32) -> NaiveDate {
    last_dose
        .checked_add_months(Months::new(interval_months))
        .unwrap_or(NaiveDate::MAX)
}

/// Rejects a registration that would exceed the schedule's dose ceiling.
/// Schedules without a ceiling (recurring) always pass.
pub(crate) fn check_dose_limit(
    schedule: &VaccineSchedule,
    doses_taken: usize,
) -> Result<(), RuleViolation> {
    let Some(total) = schedule.total_doses() else {
        return Ok(());
    };
    if doses_taken as u32 >= total {
        return Err(RuleViolation::DoseLimitReached {
            name: schedule.name.clone(),
            total,
        });
    }
    Ok(())
}

/// Rejects a registration dated before the minimum interval since the latest
/// prior dose has elapsed. A first dose has no prior dose and always passes.
pub(crate) fn check_interval(
    schedule: &VaccineSchedule,
    last_dose: Option<NaiveDate>,
    date: NaiveDate,
) -> Result<(), RuleViolation> {
    let Some(last) = last_dose else {
        return Ok(());
    };
    let next_eligible = next_eligible_date(last, schedule.dose_interval_months);
    if date < next_eligible {
        return Err(RuleViolation::DoseTooEarly {
            name: schedule.name.clone(),
            next_eligible,
        });
    }
    Ok(())
}

/// Whether the person has fallen behind on this vaccine as of `today`.
/// `doses` must be the person's doses of this vaccine, sorted ascending.
pub(crate) fn is_overdue(
    schedule: &VaccineSchedule,
    person: &Person,
    doses: &[VaccinationEvent],
    today: NaiveDate,
) -> bool {
    if person.age < schedule.minimum_age {
        return false;
    }
    if let Some(total) = schedule.total_doses() {
        if doses.len() as u32 >= total {
            return false;
        }
    }
    match doses.last() {
        None => true,
        Some(last) => today > next_eligible_date(last.date, schedule.dose_interval_months),
    }
}
