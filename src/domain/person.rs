use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AddressId, AddressLine, AddressType, DocumentNumber, DocumentType, EmailAddress, EmailId,
    Gender, PersonId, PersonName, PhoneId, PhoneNumber, PhoneType,
};

/// Person record with its owned contact collections.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub document_type: DocumentType,
    pub document_number: DocumentNumber,
    pub names: PersonName,
    pub last_name1: PersonName,
    pub last_name2: Option<PersonName>,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub addresses: Vec<Address>,
    pub phones: Vec<Phone>,
    pub emails: Vec<Email>,
}

impl Person {
    /// Names and last names joined by single spaces.
    pub fn full_name(&self) -> String {
        full_name(
            self.names.as_str(),
            self.last_name1.as_str(),
            self.last_name2.as_ref().map(PersonName::as_str),
        )
    }
}

/// Joins the name components, skipping a missing or blank second last name.
pub fn full_name(names: &str, last_name1: &str, last_name2: Option<&str>) -> String {
    match last_name2.map(str::trim).filter(|s| !s.is_empty()) {
        Some(last_name2) => format!("{names} {last_name1} {last_name2}"),
        None => format!("{names} {last_name1}"),
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    pub person_id: PersonId,
    pub address_line: AddressLine,
    pub address_type: AddressType,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    pub id: PhoneId,
    pub person_id: PersonId,
    pub phone_number: PhoneNumber,
    pub phone_type: PhoneType,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: EmailId,
    pub person_id: PersonId,
    pub email_address: EmailAddress,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewAddress {
    pub address_line: AddressLine,
    pub address_type: AddressType,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewPhone {
    pub phone_number: PhoneNumber,
    pub phone_type: PhoneType,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewEmail {
    pub email_address: EmailAddress,
}

/// Person data accepted on create; identities are assigned by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPerson {
    pub document_type: DocumentType,
    pub document_number: DocumentNumber,
    pub names: PersonName,
    pub last_name1: PersonName,
    pub last_name2: Option<PersonName>,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub addresses: Vec<NewAddress>,
    pub phones: Vec<NewPhone>,
    pub emails: Vec<NewEmail>,
}

/// Replacement values for an existing person.
///
/// Every scalar field is overwritten and the three child collections replace
/// the stored ones wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdatePerson {
    pub document_type: DocumentType,
    pub document_number: DocumentNumber,
    pub names: PersonName,
    pub last_name1: PersonName,
    pub last_name2: Option<PersonName>,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub addresses: Vec<NewAddress>,
    pub phones: Vec<NewPhone>,
    pub emails: Vec<NewEmail>,
}

impl From<NewPerson> for UpdatePerson {
    fn from(person: NewPerson) -> Self {
        Self {
            document_type: person.document_type,
            document_number: person.document_number,
            names: person.names,
            last_name1: person.last_name1,
            last_name2: person.last_name2,
            gender: person.gender,
            birth_date: person.birth_date,
            addresses: person.addresses,
            phones: person.phones,
            emails: person.emails,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_skips_missing_second_last_name() {
        assert_eq!(full_name("Ana", "Garcia", Some("Lopez")), "Ana Garcia Lopez");
        assert_eq!(full_name("Ana", "Garcia", None), "Ana Garcia");
        assert_eq!(full_name("Ana", "Garcia", Some("  ")), "Ana Garcia");
    }

    #[test]
    fn person_serializes_with_camel_case_fields() {
        let person = Person {
            id: PersonId::new(1).unwrap(),
            document_type: DocumentType::CedulaCiudadania,
            document_number: DocumentNumber::new("1020304050").unwrap(),
            names: PersonName::new("Ana").unwrap(),
            last_name1: PersonName::new("Garcia").unwrap(),
            last_name2: None,
            gender: Gender::Female,
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            addresses: vec![],
            phones: vec![],
            emails: vec![],
        };

        let value = serde_json::to_value(&person).unwrap();

        assert_eq!(value["documentType"], "CC");
        assert_eq!(value["documentNumber"], "1020304050");
        assert_eq!(value["lastName1"], "Garcia");
        assert!(value["lastName2"].is_null());
        assert_eq!(value["birthDate"], "1990-05-17");
        assert_eq!(value["addresses"], serde_json::json!([]));
    }
}
