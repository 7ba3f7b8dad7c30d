use std::sync::Arc;

use super::domain::{Person, PersonDraft, PersonId};
use super::error::{NotFound, RegistryError, RuleViolation};
use super::store::PersonStore;

/// CRUD service for registered people.
pub struct PersonService<S> {
    store: Arc<S>,
}

impl<S> PersonService<S>
where
    S: PersonStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn create(&self, draft: PersonDraft) -> Result<Person, RegistryError> {
        if draft.name.trim().is_empty() {
            return Err(RuleViolation::EmptyName.into());
        }
        Ok(self.store.add(draft)?)
    }

    /// Full replacement of the mutable fields; the id is preserved.
    pub fn update(&self, id: PersonId, draft: PersonDraft) -> Result<Person, RegistryError> {
        if draft.name.trim().is_empty() {
            return Err(RuleViolation::EmptyName.into());
        }
        let mut person = self.get_by_id(id)?;
        person.name = draft.name;
        person.age = draft.age;
        person.sex = draft.sex;
        self.store.update(person.clone())?;
        Ok(person)
    }

    pub fn delete(&self, id: PersonId) -> Result<(), RegistryError> {
        let person = self.get_by_id(id)?;
        self.store.remove(person.id)?;
        Ok(())
    }

    pub fn get_by_id(&self, id: PersonId) -> Result<Person, RegistryError> {
        self.store
            .get(id)?
            .ok_or_else(|| NotFound::Person(id).into())
    }

    pub fn get_all(&self) -> Result<Vec<Person>, RegistryError> {
        Ok(self.store.list()?)
    }
}
