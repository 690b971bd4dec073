//! Use cases for creating, reading, replacing and deleting person records.

use chrono::NaiveDate;

use crate::domain::eligibility::check_document_type_for_age;
use crate::domain::person::{NewPerson, Person, UpdatePerson};
use crate::domain::types::PersonId;
use crate::forms::person::PersonForm;
use crate::repository::errors::RepositoryError;
use crate::repository::{PersonReader, PersonWriter};
use crate::services::{ServiceError, ServiceResult};

const DUPLICATE_DOCUMENT: &str = "A person with the same document type and number already exists.";

fn person_not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Person with ID {id} not found."))
}

fn parse_id(id: i32) -> ServiceResult<PersonId> {
    PersonId::new(id).map_err(|_| person_not_found(id))
}

/// Returns every stored person, failing with `NotFound` when there are none.
pub fn list_people<R>(repo: &R) -> ServiceResult<Vec<Person>>
where
    R: PersonReader + ?Sized,
{
    let people = repo.list_people().map_err(|err| {
        log::error!("Failed to list people: {err}");
        err
    })?;

    if people.is_empty() {
        return Err(ServiceError::NotFound("No people found.".to_string()));
    }

    Ok(people)
}

pub fn get_person<R>(repo: &R, id: i32) -> ServiceResult<Person>
where
    R: PersonReader + ?Sized,
{
    let person_id = parse_id(id)?;

    repo.get_person_by_id(person_id)
        .map_err(|err| {
            log::error!("Failed to load person {id}: {err}");
            err
        })?
        .ok_or_else(|| person_not_found(id))
}

/// Validates the form, checks the document type against the age on `today`
/// and rejects a document pair that is already registered.
pub fn create_person<R>(repo: &R, form: PersonForm, today: NaiveDate) -> ServiceResult<Person>
where
    R: PersonReader + PersonWriter + ?Sized,
{
    let new_person = NewPerson::try_from(form)?;

    check_document_type_for_age(new_person.birth_date, new_person.document_type, today)?;

    let in_use = repo
        .document_in_use(new_person.document_type, &new_person.document_number, None)
        .map_err(|err| {
            log::error!("Failed to check document uniqueness: {err}");
            err
        })?;
    if in_use {
        return Err(ServiceError::Conflict(DUPLICATE_DOCUMENT.to_string()));
    }

    let person = repo.create_person(&new_person).map_err(|err| {
        log::error!("Failed to create person: {err}");
        err
    })?;
    log::info!("Created person {}", person.id);

    Ok(person)
}

/// Overwrites every field of an existing person and replaces its contact
/// collections.
pub fn update_person<R>(
    repo: &R,
    id: i32,
    form: PersonForm,
    today: NaiveDate,
) -> ServiceResult<Person>
where
    R: PersonReader + PersonWriter + ?Sized,
{
    let updates = UpdatePerson::try_from(form)?;

    check_document_type_for_age(updates.birth_date, updates.document_type, today)?;

    let person_id = parse_id(id)?;
    let existing = repo.get_person_by_id(person_id).map_err(|err| {
        log::error!("Failed to load person {id}: {err}");
        err
    })?;
    if existing.is_none() {
        return Err(person_not_found(id));
    }

    let in_use = repo
        .document_in_use(
            updates.document_type,
            &updates.document_number,
            Some(person_id),
        )
        .map_err(|err| {
            log::error!("Failed to check document uniqueness: {err}");
            err
        })?;
    if in_use {
        return Err(ServiceError::Conflict(DUPLICATE_DOCUMENT.to_string()));
    }

    match repo.update_person(person_id, &updates) {
        Ok(person) => {
            log::info!("Updated person {id}");
            Ok(person)
        }
        Err(RepositoryError::NotFound) => Err(person_not_found(id)),
        Err(err) => {
            log::error!("Failed to update person {id}: {err}");
            Err(err.into())
        }
    }
}

/// Deletes the person together with its addresses, phones and emails.
pub fn delete_person<R>(repo: &R, id: i32) -> ServiceResult<()>
where
    R: PersonWriter + ?Sized,
{
    let person_id = parse_id(id)?;

    match repo.delete_person(person_id) {
        Ok(()) => {
            log::info!("Deleted person {id}");
            Ok(())
        }
        Err(RepositoryError::NotFound) => Err(person_not_found(id)),
        Err(err) => {
            log::error!("Failed to delete person {id}: {err}");
            Err(err.into())
        }
    }
}
