use diesel::prelude::*;

use crate::domain::person::{Address as DomainAddress, NewAddress as DomainNewAddress};
use crate::domain::types::{AddressId, AddressLine, AddressType, PersonId, TypeConstraintError};
use crate::models::person::Person;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Person, foreign_key = person_id))]
#[diesel(table_name = crate::schema::addresses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::person::Address`].
pub struct Address {
    pub id: i32,
    pub person_id: i32,
    pub address_line: String,
    pub address_type: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::addresses)]
/// Insertable form of [`Address`] bound to its owner.
pub struct NewAddress<'a> {
    pub person_id: i32,
    pub address_line: &'a str,
    pub address_type: &'a str,
}

impl<'a> NewAddress<'a> {
    pub fn new(person_id: i32, address: &'a DomainNewAddress) -> Self {
        Self {
            person_id,
            address_line: address.address_line.as_str(),
            address_type: address.address_type.as_str(),
        }
    }
}

impl TryFrom<Address> for DomainAddress {
    type Error = TypeConstraintError;

    fn try_from(address: Address) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AddressId::try_from(address.id)?,
            person_id: PersonId::try_from(address.person_id)?,
            address_line: AddressLine::new(address.address_line)?,
            address_type: AddressType::new(address.address_type)?,
        })
    }
}
