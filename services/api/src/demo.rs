use std::sync::Arc;

use chrono::{Local, Months, NaiveDate};
use clap::Args;
use vaccine_card::error::AppError;
use vaccine_card::registry::{
    PersonDraft, Registry, ScheduleDraft, Sex, VaccinationDraft,
};

use crate::infra::{InMemoryPersonStore, InMemoryVaccinationStore, InMemoryVaccineStore};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for the walkthrough (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    let registry = Registry::new(
        Arc::new(InMemoryPersonStore::default()),
        Arc::new(InMemoryVaccineStore::default()),
        Arc::new(InMemoryVaccinationStore::default()),
    );

    println!("Vaccination registry demo (evaluated {today})");

    println!("\nSeeding the vaccine catalog");
    let hepatitis = registry.vaccines.create(ScheduleDraft {
        name: "Hepatitis B".to_string(),
        minimum_age: 0,
        dose_interval_months: 1,
        recurring: false,
        dose_count: Some(3),
        has_booster: false,
        booster_count: None,
    })?;
    let tetanus = registry.vaccines.create(ScheduleDraft {
        name: "Tetanus".to_string(),
        minimum_age: 0,
        dose_interval_months: 6,
        recurring: false,
        dose_count: Some(3),
        has_booster: true,
        booster_count: Some(2),
    })?;
    registry.vaccines.create(ScheduleDraft {
        name: "Seasonal flu".to_string(),
        minimum_age: 6,
        dose_interval_months: 12,
        recurring: true,
        dose_count: None,
        has_booster: false,
        booster_count: None,
    })?;
    for vaccine in registry.vaccines.get_all()? {
        match vaccine.total_doses() {
            Some(total) => println!(
                "- {} (every {} months, {} doses total)",
                vaccine.name, vaccine.dose_interval_months, total
            ),
            None => println!(
                "- {} (recurring, every {} months)",
                vaccine.name, vaccine.dose_interval_months
            ),
        }
    }

    let person = registry.people.create(PersonDraft {
        name: "Joana Prado".to_string(),
        age: 30,
        sex: Sex::Female,
    })?;
    println!(
        "\nRegistered person {} ({}, age {})",
        person.name,
        person.sex.label(),
        person.age
    );

    println!("\nRecording doses");
    for (vaccine, months) in [(&hepatitis, 3), (&hepatitis, 2), (&tetanus, 8)] {
        let event = registry.vaccinations.create(VaccinationDraft {
            person_id: person.id,
            vaccine_id: vaccine.id,
            date: months_before(today, months),
        })?;
        println!("- {} on {}", vaccine.name, event.date);
    }

    // A tetanus dose four months after the first breaks the six-month rule.
    let early = VaccinationDraft {
        person_id: person.id,
        vaccine_id: tetanus.id,
        date: months_before(today, 4),
    };
    match registry.vaccinations.create(early) {
        Ok(event) => println!("- {} on {}", tetanus.name, event.date),
        Err(err) => println!("- rejected: {err}"),
    }

    let second_tetanus = registry.vaccinations.create(VaccinationDraft {
        person_id: person.id,
        vaccine_id: tetanus.id,
        date: today,
    })?;
    println!("- {} on {}", tetanus.name, second_tetanus.date);

    println!("\nHistory by vaccine");
    for group in registry.vaccinations.history_by_person(person.id)? {
        let vaccine = registry.vaccines.get_by_id(group.vaccine_id)?;
        let dates: Vec<String> = group
            .doses
            .iter()
            .map(|dose| dose.date.to_string())
            .collect();
        println!("- {}: {}", vaccine.name, dates.join(", "));
    }

    println!("\nOverdue vaccines");
    let overdue = registry
        .vaccinations
        .find_overdue_by_person(person.id, today)?;
    if overdue.is_empty() {
        println!("- none");
    } else {
        for vaccine in &overdue {
            println!("- {}", vaccine.name);
        }
    }

    Ok(())
}
