use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        person::{NewPerson, Person, UpdatePerson},
        search::{
            BirthDateRange, PersonBirthDateMatch, PersonDocumentMatch, PersonFirstAddress,
            PersonPhoneCount,
        },
        types::{DocumentNumber, DocumentType, PersonId},
    },
    repository::errors::RepositoryResult,
};

pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod person;
pub mod search;

/// Diesel-backed repository shared by every handler.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

pub trait PersonReader {
    fn get_person_by_id(&self, id: PersonId) -> RepositoryResult<Option<Person>>;
    fn list_people(&self) -> RepositoryResult<Vec<Person>>;
    /// Whether another person already holds this document, ignoring `exclude`.
    fn document_in_use(
        &self,
        document_type: DocumentType,
        document_number: &DocumentNumber,
        exclude: Option<PersonId>,
    ) -> RepositoryResult<bool>;
}

pub trait PersonWriter {
    fn create_person(&self, new_person: &NewPerson) -> RepositoryResult<Person>;
    fn update_person(&self, id: PersonId, updates: &UpdatePerson) -> RepositoryResult<Person>;
    fn delete_person(&self, id: PersonId) -> RepositoryResult<()>;
}

pub trait PersonSearch {
    fn search_people_by_name(&self, fragment: &str)
    -> RepositoryResult<Vec<PersonDocumentMatch>>;
    fn search_people_by_document(&self, fragment: &str)
    -> RepositoryResult<Vec<PersonDocumentMatch>>;
    fn search_people_by_birth_date(
        &self,
        range: BirthDateRange,
    ) -> RepositoryResult<Vec<PersonBirthDateMatch>>;
    fn people_with_multiple_phones(&self) -> RepositoryResult<Vec<PersonPhoneCount>>;
    fn people_with_multiple_addresses(&self) -> RepositoryResult<Vec<PersonFirstAddress>>;
}
