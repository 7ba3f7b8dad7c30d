use super::common::*;
use crate::registry::domain::{PersonDraft, PersonId, Sex};
use crate::registry::error::{NotFound, RegistryError, RuleViolation};

#[test]
fn create_assigns_id_and_preserves_fields() {
    let (registry, _) = build_registry();

    let person = registry.people.create(adult()).expect("person created");

    assert_eq!(person.id, PersonId(1));
    assert_eq!(person.name, "Joana Prado");
    assert_eq!(person.age, 30);
    assert_eq!(person.sex, Sex::Female);
}

#[test]
fn create_rejects_empty_name() {
    let (registry, _) = build_registry();

    let draft = PersonDraft {
        name: "   ".to_string(),
        age: 30,
        sex: Sex::Other,
    };

    match registry.people.create(draft) {
        Err(RegistryError::Rule(RuleViolation::EmptyName)) => {}
        other => panic!("expected empty name rejection, got {other:?}"),
    }
}

#[test]
fn update_replaces_all_fields() {
    let (registry, _) = build_registry();
    let person = registry.people.create(adult()).expect("person created");

    let updated = registry
        .people
        .update(
            person.id,
            PersonDraft {
                name: "Joana P. Prado".to_string(),
                age: 31,
                sex: Sex::Female,
            },
        )
        .expect("person updated");

    assert_eq!(updated.id, person.id);
    assert_eq!(updated.name, "Joana P. Prado");
    assert_eq!(updated.age, 31);

    let fetched = registry.people.get_by_id(person.id).expect("person fetched");
    assert_eq!(fetched, updated);
}

#[test]
fn update_missing_person_is_not_found() {
    let (registry, _) = build_registry();

    match registry.people.update(PersonId(999), adult()) {
        Err(RegistryError::NotFound(NotFound::Person(PersonId(999)))) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn delete_then_get_is_not_found() {
    let (registry, _) = build_registry();
    let person = registry.people.create(adult()).expect("person created");

    registry.people.delete(person.id).expect("person deleted");

    match registry.people.get_by_id(person.id) {
        Err(RegistryError::NotFound(NotFound::Person(id))) => assert_eq!(id, person.id),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn delete_missing_person_is_not_found() {
    let (registry, _) = build_registry();

    match registry.people.delete(PersonId(7)) {
        Err(RegistryError::NotFound(NotFound::Person(PersonId(7)))) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn get_all_returns_current_snapshot() {
    let (registry, _) = build_registry();
    registry.people.create(adult()).expect("first person");
    registry.people.create(infant()).expect("second person");

    let people = registry.people.get_all().expect("people listed");
    assert_eq!(people.len(), 2);
    assert!(people.iter().any(|person| person.name == "Miguel Prado"));
}

#[test]
fn not_found_message_names_entity_and_id() {
    let (registry, _) = build_registry();

    let err = registry
        .people
        .get_by_id(PersonId(42))
        .expect_err("missing person");
    assert_eq!(err.to_string(), "person not found with id: 42");
}

#[test]
fn sex_labels_cover_every_variant() {
    let labels: Vec<&str> = Sex::ALL.iter().map(|sex| sex.label()).collect();
    assert_eq!(labels, vec!["female", "male", "other"]);
}
