use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::person::{NewAddress, NewEmail, NewPerson, NewPhone, UpdatePerson};
use crate::domain::types::{
    AddressLine, AddressType, DocumentNumber, DocumentType, EmailAddress, Gender, PersonName,
    PhoneNumber, PhoneType, TypeConstraintError, is_numeric, is_person_name, is_storable_date,
};
use crate::forms::FormError;

fn validate_document_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<DocumentType>()
        .map(|_| ())
        .map_err(|_| {
            ValidationError::new("document_type")
                .with_message("The document type must be CC, TI or RC.".into())
        })
}

fn validate_numeric(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || is_numeric(value) {
        Ok(())
    } else {
        Err(ValidationError::new("numeric").with_message("Only numbers are allowed.".into()))
    }
}

/// Empty values are left to the length rule.
fn validate_person_name(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || is_person_name(value) {
        Ok(())
    } else {
        Err(ValidationError::new("name")
            .with_message("Only letters and spaces are allowed.".into()))
    }
}

fn validate_gender(value: &str) -> Result<(), ValidationError> {
    value.parse::<Gender>().map(|_| ()).map_err(|_| {
        ValidationError::new("gender").with_message("The gender must be 'F' or 'M'.".into())
    })
}

fn validate_birth_date(value: &NaiveDate) -> Result<(), ValidationError> {
    if is_storable_date(*value) {
        Ok(())
    } else {
        Err(ValidationError::new("birth_date")
            .with_message("The birth date year must be between 1 and 9999.".into()))
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
/// JSON body for creating or replacing a person.
pub struct PersonForm {
    #[validate(custom(function = "validate_document_type"))]
    pub document_type: String,
    #[validate(
        length(min = 1, max = 11, message = "The document number must have at most 11 digits."),
        custom(function = "validate_numeric")
    )]
    pub document_number: String,
    #[validate(
        length(min = 1, max = 30, message = "The names are required and limited to 30 characters."),
        custom(function = "validate_person_name")
    )]
    pub names: String,
    #[validate(
        length(min = 1, max = 30, message = "The first last name is required and limited to 30 characters."),
        custom(function = "validate_person_name")
    )]
    pub last_name1: String,
    #[validate(
        length(max = 30, message = "The second last name is limited to 30 characters."),
        custom(function = "validate_person_name")
    )]
    pub last_name2: Option<String>,
    #[validate(custom(function = "validate_gender"))]
    pub gender: String,
    #[validate(
        required(message = "The birth date is required."),
        custom(function = "validate_birth_date")
    )]
    pub birth_date: Option<NaiveDate>,
    #[validate(nested)]
    pub addresses: Vec<AddressForm>,
    #[validate(nested)]
    pub phones: Vec<PhoneForm>,
    #[validate(nested)]
    pub emails: Vec<EmailForm>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct AddressForm {
    #[validate(length(min = 1, max = 255, message = "The address is required and limited to 255 characters."))]
    pub address_line: String,
    #[validate(length(min = 1, max = 30, message = "The address type is required and limited to 30 characters."))]
    pub address_type: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct PhoneForm {
    #[validate(
        length(min = 1, max = 20, message = "The phone number is required and limited to 20 digits."),
        custom(function = "validate_numeric")
    )]
    pub phone_number: String,
    #[validate(length(min = 1, max = 20, message = "The phone type is required and limited to 20 characters."))]
    pub phone_type: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct EmailForm {
    #[validate(
        length(max = 255, message = "The email is limited to 255 characters."),
        email(message = "The email address is not valid.")
    )]
    pub email_address: String,
}

impl TryFrom<AddressForm> for NewAddress {
    type Error = FormError;

    fn try_from(form: AddressForm) -> Result<Self, Self::Error> {
        Ok(Self {
            address_line: AddressLine::new(form.address_line)
                .map_err(FormError::field("addressLine"))?,
            address_type: AddressType::new(form.address_type)
                .map_err(FormError::field("addressType"))?,
        })
    }
}

impl TryFrom<PhoneForm> for NewPhone {
    type Error = FormError;

    fn try_from(form: PhoneForm) -> Result<Self, Self::Error> {
        Ok(Self {
            phone_number: PhoneNumber::new(form.phone_number)
                .map_err(FormError::field("phoneNumber"))?,
            phone_type: PhoneType::new(form.phone_type).map_err(FormError::field("phoneType"))?,
        })
    }
}

impl TryFrom<EmailForm> for NewEmail {
    type Error = FormError;

    fn try_from(form: EmailForm) -> Result<Self, Self::Error> {
        Ok(Self {
            email_address: EmailAddress::new(form.email_address)
                .map_err(FormError::field("emailAddress"))?,
        })
    }
}

impl TryFrom<PersonForm> for NewPerson {
    type Error = FormError;

    /// Runs the field rules, then converts every value into its domain type.
    fn try_from(form: PersonForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let birth_date = form.birth_date.ok_or(FormError::Field {
            field: "birthDate",
            source: TypeConstraintError::EmptyString,
        })?;

        Ok(Self {
            document_type: form
                .document_type
                .parse()
                .map_err(FormError::field("documentType"))?,
            document_number: DocumentNumber::new(form.document_number)
                .map_err(FormError::field("documentNumber"))?,
            names: PersonName::new(form.names).map_err(FormError::field("names"))?,
            last_name1: PersonName::new(form.last_name1).map_err(FormError::field("lastName1"))?,
            last_name2: form
                .last_name2
                .filter(|s| !s.trim().is_empty())
                .map(PersonName::new)
                .transpose()
                .map_err(FormError::field("lastName2"))?,
            gender: form.gender.parse().map_err(FormError::field("gender"))?,
            birth_date,
            addresses: form
                .addresses
                .into_iter()
                .map(NewAddress::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            phones: form
                .phones
                .into_iter()
                .map(NewPhone::try_from)
                .collect::<Result<Vec<_>, _>>()?,
            emails: form
                .emails
                .into_iter()
                .map(NewEmail::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

impl TryFrom<PersonForm> for UpdatePerson {
    type Error = FormError;

    fn try_from(form: PersonForm) -> Result<Self, Self::Error> {
        NewPerson::try_from(form).map(UpdatePerson::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::field_errors;

    fn valid_form() -> PersonForm {
        PersonForm {
            document_type: "CC".into(),
            document_number: "1032456789".into(),
            names: "María José".into(),
            last_name1: "Núñez".into(),
            last_name2: Some("Peña".into()),
            gender: "F".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 17),
            addresses: vec![AddressForm {
                address_line: "Calle 10 # 5-20".into(),
                address_type: "Home".into(),
            }],
            phones: vec![PhoneForm {
                phone_number: "3001234567".into(),
                phone_type: "Mobile".into(),
            }],
            emails: vec![EmailForm {
                email_address: "Maria@Example.com".into(),
            }],
        }
    }

    #[test]
    fn valid_form_converts_into_new_person() {
        let person = NewPerson::try_from(valid_form()).expect("valid form");
        assert_eq!(person.document_type, DocumentType::CedulaCiudadania);
        assert_eq!(person.names.as_str(), "María José");
        assert_eq!(person.gender, Gender::Female);
        assert_eq!(person.addresses.len(), 1);
        assert_eq!(person.emails[0].email_address.as_str(), "maria@example.com");
    }

    #[test]
    fn camel_case_json_is_accepted() {
        let form: PersonForm = serde_json::from_str(
            r#"{
                "documentType": "TI",
                "documentNumber": "99887766",
                "names": "Luis",
                "lastName1": "Mora",
                "gender": "M",
                "birthDate": "2012-04-01"
            }"#,
        )
        .expect("form should deserialize");

        let person = NewPerson::try_from(form).expect("valid form");
        assert_eq!(person.last_name2, None);
        assert_eq!(
            person.birth_date,
            NaiveDate::from_ymd_opt(2012, 4, 1).expect("valid date")
        );
        assert!(person.phones.is_empty());
    }

    #[test]
    fn non_numeric_document_number_is_reported() {
        let mut form = valid_form();
        form.document_number = "12a45".into();

        let errors = form.validate().expect_err("should fail");
        let fields = field_errors(&errors);

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "documentNumber");
        assert_eq!(fields[0].message, "Only numbers are allowed.");
    }

    #[test]
    fn invalid_values_are_reported_per_field() {
        let mut form = valid_form();
        form.document_type = "XX".into();
        form.names = "Ana2".into();
        form.gender = "X".into();
        form.birth_date = None;

        let errors = form.validate().expect_err("should fail");
        let fields: Vec<_> = field_errors(&errors)
            .into_iter()
            .map(|error| error.field)
            .collect();

        assert_eq!(fields, vec!["birthDate", "documentType", "gender", "names"]);
    }

    #[test]
    fn nested_child_errors_carry_their_index() {
        let mut form = valid_form();
        form.phones.push(PhoneForm {
            phone_number: "300-123".into(),
            phone_type: "Work".into(),
        });

        let errors = form.validate().expect_err("should fail");
        let fields = field_errors(&errors);

        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "phones[1].phoneNumber");
    }

    #[test]
    fn birth_date_years_outside_four_digits_are_rejected() {
        for year in [-500, 0, 10000] {
            let mut form = valid_form();
            form.birth_date = NaiveDate::from_ymd_opt(year, 6, 1);

            let errors = form.validate().expect_err("should fail");
            let fields = field_errors(&errors);

            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].field, "birthDate");
        }
    }

    #[test]
    fn too_long_name_is_rejected() {
        let mut form = valid_form();
        form.last_name1 = "a".repeat(31);

        assert!(matches!(
            NewPerson::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}
