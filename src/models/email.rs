use diesel::prelude::*;

use crate::domain::person::{Email as DomainEmail, NewEmail as DomainNewEmail};
use crate::domain::types::{EmailAddress, EmailId, PersonId, TypeConstraintError};
use crate::models::person::Person;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Person, foreign_key = person_id))]
#[diesel(table_name = crate::schema::emails)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::person::Email`].
pub struct Email {
    pub id: i32,
    pub person_id: i32,
    pub email_address: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::emails)]
pub struct NewEmail<'a> {
    pub person_id: i32,
    pub email_address: &'a str,
}

impl<'a> NewEmail<'a> {
    pub fn new(person_id: i32, email: &'a DomainNewEmail) -> Self {
        Self {
            person_id,
            email_address: email.email_address.as_str(),
        }
    }
}

impl TryFrom<Email> for DomainEmail {
    type Error = TypeConstraintError;

    fn try_from(email: Email) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EmailId::try_from(email.id)?,
            person_id: PersonId::try_from(email.person_id)?,
            email_address: EmailAddress::new(email.email_address)?,
        })
    }
}
