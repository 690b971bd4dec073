use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::person::{
    Address as DomainAddress, Email as DomainEmail, NewPerson as DomainNewPerson,
    Person as DomainPerson, Phone as DomainPhone, UpdatePerson as DomainUpdatePerson,
};
use crate::domain::types::{
    DocumentNumber, DocumentType, Gender, PersonId, PersonName, TypeConstraintError,
};
use crate::models::address::Address;
use crate::models::email::Email;
use crate::models::phone::Phone;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::people)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::person::Person`] without its children.
pub struct Person {
    pub id: i32,
    pub document_type: String,
    pub document_number: String,
    pub names: String,
    pub last_name1: String,
    pub last_name2: Option<String>,
    pub gender: String,
    pub birth_date: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::people)]
/// Insertable form of [`Person`].
pub struct NewPerson<'a> {
    pub document_type: &'a str,
    pub document_number: &'a str,
    pub names: &'a str,
    pub last_name1: &'a str,
    pub last_name2: Option<&'a str>,
    pub gender: &'a str,
    pub birth_date: NaiveDate,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::people)]
#[diesel(treat_none_as_null = true)]
/// Data used when overwriting a [`Person`] record.
pub struct UpdatePerson<'a> {
    pub document_type: &'a str,
    pub document_number: &'a str,
    pub names: &'a str,
    pub last_name1: &'a str,
    pub last_name2: Option<&'a str>,
    pub gender: &'a str,
    pub birth_date: NaiveDate,
}

impl Person {
    /// Names joined for the search projections.
    pub fn full_name(&self) -> String {
        crate::domain::person::full_name(
            &self.names,
            &self.last_name1,
            self.last_name2.as_deref(),
        )
    }
}

impl TryFrom<(Person, Vec<Address>, Vec<Phone>, Vec<Email>)> for DomainPerson {
    type Error = TypeConstraintError;

    fn try_from(
        (person, addresses, phones, emails): (Person, Vec<Address>, Vec<Phone>, Vec<Email>),
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PersonId::try_from(person.id)?,
            document_type: DocumentType::try_from(person.document_type.as_str())?,
            document_number: DocumentNumber::new(person.document_number)?,
            names: PersonName::new(person.names)?,
            last_name1: PersonName::new(person.last_name1)?,
            last_name2: person
                .last_name2
                .filter(|s| !s.trim().is_empty())
                .map(PersonName::new)
                .transpose()?,
            gender: Gender::try_from(person.gender.as_str())?,
            birth_date: person.birth_date,
            addresses: addresses
                .into_iter()
                .map(DomainAddress::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            phones: phones
                .into_iter()
                .map(DomainPhone::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            emails: emails
                .into_iter()
                .map(DomainEmail::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl<'a> From<&'a DomainNewPerson> for NewPerson<'a> {
    fn from(person: &'a DomainNewPerson) -> Self {
        Self {
            document_type: person.document_type.as_str(),
            document_number: person.document_number.as_str(),
            names: person.names.as_str(),
            last_name1: person.last_name1.as_str(),
            last_name2: person.last_name2.as_ref().map(PersonName::as_str),
            gender: person.gender.as_str(),
            birth_date: person.birth_date,
        }
    }
}

impl<'a> From<&'a DomainUpdatePerson> for UpdatePerson<'a> {
    fn from(person: &'a DomainUpdatePerson) -> Self {
        Self {
            document_type: person.document_type.as_str(),
            document_number: person.document_number.as_str(),
            names: person.names.as_str(),
            last_name1: person.last_name1.as_str(),
            last_name2: person.last_name2.as_ref().map(PersonName::as_str),
            gender: person.gender.as_str(),
            birth_date: person.birth_date,
        }
    }
}
