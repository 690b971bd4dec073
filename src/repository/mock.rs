//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::person::{NewPerson, Person, UpdatePerson};
use crate::domain::search::{
    BirthDateRange, PersonBirthDateMatch, PersonDocumentMatch, PersonFirstAddress,
    PersonPhoneCount,
};
use crate::domain::types::{DocumentNumber, DocumentType, PersonId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{PersonReader, PersonSearch, PersonWriter};

mock! {
    pub Repository {}

    impl PersonReader for Repository {
        fn get_person_by_id(&self, id: PersonId) -> RepositoryResult<Option<Person>>;
        fn list_people(&self) -> RepositoryResult<Vec<Person>>;
        fn document_in_use(
            &self,
            document_type: DocumentType,
            document_number: &DocumentNumber,
            exclude: Option<PersonId>,
        ) -> RepositoryResult<bool>;
    }

    impl PersonWriter for Repository {
        fn create_person(&self, new_person: &NewPerson) -> RepositoryResult<Person>;
        fn update_person(&self, id: PersonId, updates: &UpdatePerson) -> RepositoryResult<Person>;
        fn delete_person(&self, id: PersonId) -> RepositoryResult<()>;
    }

    impl PersonSearch for Repository {
        fn search_people_by_name(&self, fragment: &str) -> RepositoryResult<Vec<PersonDocumentMatch>>;
        fn search_people_by_document(&self, fragment: &str) -> RepositoryResult<Vec<PersonDocumentMatch>>;
        fn search_people_by_birth_date(
            &self,
            range: BirthDateRange,
        ) -> RepositoryResult<Vec<PersonBirthDateMatch>>;
        fn people_with_multiple_phones(&self) -> RepositoryResult<Vec<PersonPhoneCount>>;
        fn people_with_multiple_addresses(&self) -> RepositoryResult<Vec<PersonFirstAddress>>;
    }
}
