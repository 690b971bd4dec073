use diesel::prelude::*;

use crate::domain::person::{NewPhone as DomainNewPhone, Phone as DomainPhone};
use crate::domain::types::{PersonId, PhoneId, PhoneNumber, PhoneType, TypeConstraintError};
use crate::models::person::Person;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Person, foreign_key = person_id))]
#[diesel(table_name = crate::schema::phones)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
/// Diesel model for [`crate::domain::person::Phone`].
pub struct Phone {
    pub id: i32,
    pub person_id: i32,
    pub phone_number: String,
    pub phone_type: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::phones)]
pub struct NewPhone<'a> {
    pub person_id: i32,
    pub phone_number: &'a str,
    pub phone_type: &'a str,
}

impl<'a> NewPhone<'a> {
    pub fn new(person_id: i32, phone: &'a DomainNewPhone) -> Self {
        Self {
            person_id,
            phone_number: phone.phone_number.as_str(),
            phone_type: phone.phone_type.as_str(),
        }
    }
}

impl TryFrom<Phone> for DomainPhone {
    type Error = TypeConstraintError;

    fn try_from(phone: Phone) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PhoneId::try_from(phone.id)?,
            person_id: PersonId::try_from(phone.person_id)?,
            phone_number: PhoneNumber::new(phone.phone_number)?,
            phone_type: PhoneType::new(phone.phone_type)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_into_domain() {
        let db = Phone {
            id: 1,
            person_id: 2,
            phone_number: "3001234567".into(),
            phone_type: "Mobile".into(),
        };
        let domain = DomainPhone::try_from(db).unwrap();
        assert_eq!(domain.phone_number.as_str(), "3001234567");
        assert_eq!(domain.phone_type.as_str(), "Mobile");
    }

    #[test]
    fn corrupted_phone_number_is_rejected() {
        let db = Phone {
            id: 1,
            person_id: 2,
            phone_number: "call me".into(),
            phone_type: "Mobile".into(),
        };
        assert_eq!(
            DomainPhone::try_from(db),
            Err(TypeConstraintError::NotNumeric)
        );
    }
}
