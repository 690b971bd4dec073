//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce the field rules of a person record (identifier
//! positivity, document formats, name charset, length limits, email syntax)
//! so that once a value reaches the domain layer it can be treated as trusted.
use std::{ops::Deref, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateEmail;

/// Maximum length of a document number.
pub const DOCUMENT_NUMBER_MAX_LEN: usize = 11;
/// Maximum length of any name component.
pub const PERSON_NAME_MAX_LEN: usize = 30;
/// Maximum length of an address line.
pub const ADDRESS_LINE_MAX_LEN: usize = 255;
/// Maximum length of an address type label.
pub const ADDRESS_TYPE_MAX_LEN: usize = 30;
/// Maximum length of a phone number.
pub const PHONE_NUMBER_MAX_LEN: usize = 20;
/// Maximum length of a phone type label.
pub const PHONE_TYPE_MAX_LEN: usize = 20;
/// Maximum length of an email address.
pub const EMAIL_ADDRESS_MAX_LEN: usize = 255;

/// Accented letters accepted in names on top of ASCII letters.
const NAME_EXTRA_LETTERS: &str = "áéíóúÁÉÍÓÚüÜñÑ";

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided string is longer than the column allows.
    #[error("value cannot exceed {0} characters")]
    TooLong(usize),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Value was expected to contain only ASCII digits.
    #[error("value must contain only digits")]
    NotNumeric,
    /// Name contained something other than letters and spaces.
    #[error("names can only contain letters and spaces")]
    InvalidName,
    /// Document type outside of `RC`, `TI`, `CC`.
    #[error("document type must be CC, TI or RC")]
    InvalidDocumentType,
    /// Gender outside of `F`, `M`.
    #[error("gender must be 'F' or 'M'")]
    InvalidGender,
}

/// Returns `true` when the value is a non-empty run of ASCII digits.
pub fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Returns `true` when the value only holds letters (including Spanish
/// accented letters) and whitespace.
pub fn is_person_name(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || NAME_EXTRA_LETTERS.contains(c))
}

/// Earliest year a stored date may carry.
pub const MIN_DATE_YEAR: i32 = 1;
/// Latest year a stored date may carry.
pub const MAX_DATE_YEAR: i32 = 9999;

/// Returns `true` when the year has four unsigned digits, the only years whose
/// `YYYY-MM-DD` text sorts in calendar order.
pub fn is_storable_date(date: NaiveDate) -> bool {
    (MIN_DATE_YEAR..=MAX_DATE_YEAR).contains(&date.year())
}

/// Trims the value, rejecting empty and over-long inputs.
fn bounded(value: String, max_len: usize) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    if trimmed.chars().count() > max_len {
        return Err(TypeConstraintError::TooLong(max_len));
    }
    Ok(trimmed)
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = bounded(email.into(), EMAIL_ADDRESS_MAX_LEN)?.to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(PersonId, "Unique identifier for a person record.");
id_newtype!(AddressId, "Unique identifier for an address.");
id_newtype!(PhoneId, "Unique identifier for a phone.");
id_newtype!(EmailId, "Unique identifier for an email.");

/// Kind of identity document a person holds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DocumentType {
    /// Registro Civil, for children up to seven years old.
    #[serde(rename = "RC")]
    RegistroCivil,
    /// Tarjeta de Identidad, for minors between eight and seventeen.
    #[serde(rename = "TI")]
    TarjetaIdentidad,
    /// Cédula de Ciudadanía, for adults.
    #[serde(rename = "CC")]
    CedulaCiudadania,
}

impl DocumentType {
    /// Two-letter code stored in the database and exchanged over the API.
    pub const fn as_str(self) -> &'static str {
        match self {
            DocumentType::RegistroCivil => "RC",
            DocumentType::TarjetaIdentidad => "TI",
            DocumentType::CedulaCiudadania => "CC",
        }
    }
}

impl Display for DocumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RC" => Ok(DocumentType::RegistroCivil),
            "TI" => Ok(DocumentType::TarjetaIdentidad),
            "CC" => Ok(DocumentType::CedulaCiudadania),
            _ => Err(TypeConstraintError::InvalidDocumentType),
        }
    }
}

impl TryFrom<&str> for DocumentType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Gender as recorded on the identity document.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "M")]
    Male,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Gender::Female => "F",
            Gender::Male => "M",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "F" => Ok(Gender::Female),
            "M" => Ok(Gender::Male),
            _ => Err(TypeConstraintError::InvalidGender),
        }
    }
}

impl TryFrom<&str> for Gender {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Generates the accessor and conversion boilerplate shared by string wrappers.
macro_rules! string_newtype_impls {
    ($name:ident) => {
        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Macro for trimmed, non-empty strings with a maximum length.
macro_rules! bounded_string_newtype {
    ($name:ident, $max:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value within the length limit.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                Ok(Self(bounded(value.into(), $max)?))
            }
        }

        string_newtype_impls!($name);
    };
}

bounded_string_newtype!(
    AddressLine,
    ADDRESS_LINE_MAX_LEN,
    "Street address line, at most 255 characters."
);

bounded_string_newtype!(
    AddressType,
    ADDRESS_TYPE_MAX_LEN,
    "Free-form address category such as `Home` or `Office`."
);

bounded_string_newtype!(
    PhoneType,
    PHONE_TYPE_MAX_LEN,
    "Free-form phone category such as `Mobile`."
);

/// Numeric identity document number, at most 11 digits.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String")]
pub struct DocumentNumber(String);

impl DocumentNumber {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = bounded(value.into(), DOCUMENT_NUMBER_MAX_LEN)?;
        if !is_numeric(&value) {
            return Err(TypeConstraintError::NotNumeric);
        }
        Ok(Self(value))
    }
}

string_newtype_impls!(DocumentNumber);

/// Given name or last name restricted to letters and spaces.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String")]
pub struct PersonName(String);

impl PersonName {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = bounded(value.into(), PERSON_NAME_MAX_LEN)?;
        if !is_person_name(&value) {
            return Err(TypeConstraintError::InvalidName);
        }
        Ok(Self(value))
    }
}

string_newtype_impls!(PersonName);

/// Phone number made of digits only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is numeric and within 20 digits.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = bounded(value.into(), PHONE_NUMBER_MAX_LEN)?;
        if !is_numeric(&value) {
            return Err(TypeConstraintError::NotNumeric);
        }
        Ok(Self(value))
    }
}

string_newtype_impls!(PhoneNumber);

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }
}

string_newtype_impls!(EmailAddress);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_rejects_non_positive_values() {
        assert_eq!(PersonId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(PersonId::new(-3), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(PersonId::new(7).map(PersonId::get), Ok(7));
    }

    #[test]
    fn document_type_parses_known_codes_only() {
        assert_eq!("RC".parse(), Ok(DocumentType::RegistroCivil));
        assert_eq!("TI".parse(), Ok(DocumentType::TarjetaIdentidad));
        assert_eq!("CC".parse(), Ok(DocumentType::CedulaCiudadania));
        assert_eq!(
            "cc".parse::<DocumentType>(),
            Err(TypeConstraintError::InvalidDocumentType)
        );
        assert_eq!(DocumentType::CedulaCiudadania.to_string(), "CC");
    }

    #[test]
    fn document_type_serializes_as_code() {
        let json = serde_json::to_string(&DocumentType::TarjetaIdentidad).unwrap();
        assert_eq!(json, "\"TI\"");
        let back: DocumentType = serde_json::from_str("\"RC\"").unwrap();
        assert_eq!(back, DocumentType::RegistroCivil);
    }

    #[test]
    fn storable_dates_have_four_digit_years() {
        let date = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
        assert!(is_storable_date(date(1)));
        assert!(is_storable_date(date(9999)));
        assert!(!is_storable_date(date(0)));
        assert!(!is_storable_date(date(-500)));
        assert!(!is_storable_date(date(10000)));
    }

    #[test]
    fn deserializing_runs_the_constructor() {
        let number: DocumentNumber = serde_json::from_str("\"0123\"").unwrap();
        assert_eq!(number.as_str(), "0123");
        assert!(serde_json::from_str::<DocumentNumber>("\"12A\"").is_err());
        assert!(serde_json::from_str::<PersonName>("\"R2D2\"").is_err());
        assert!(serde_json::from_str::<EmailAddress>("\"not-an-email\"").is_err());
        assert!(serde_json::from_str::<AddressLine>("\"  \"").is_err());
        assert!(serde_json::from_str::<PersonId>("0").is_err());
    }

    #[test]
    fn gender_accepts_f_and_m() {
        assert_eq!("F".parse(), Ok(Gender::Female));
        assert_eq!("M".parse(), Ok(Gender::Male));
        assert_eq!("X".parse::<Gender>(), Err(TypeConstraintError::InvalidGender));
    }

    #[test]
    fn document_number_must_be_numeric_and_short() {
        assert!(DocumentNumber::new("1234567890").is_ok());
        assert_eq!(
            DocumentNumber::new("12A4"),
            Err(TypeConstraintError::NotNumeric)
        );
        assert_eq!(
            DocumentNumber::new("123456789012"),
            Err(TypeConstraintError::TooLong(DOCUMENT_NUMBER_MAX_LEN))
        );
        assert_eq!(DocumentNumber::new("  "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn person_name_accepts_accented_letters() {
        let name = PersonName::new("  María José Peñaloza ").unwrap();
        assert_eq!(name.as_str(), "María José Peñaloza");
        assert_eq!(PersonName::new("R2D2"), Err(TypeConstraintError::InvalidName));
        assert_eq!(
            PersonName::new("a".repeat(31)),
            Err(TypeConstraintError::TooLong(PERSON_NAME_MAX_LEN))
        );
        // length is counted in characters, not bytes
        assert!(PersonName::new("é".repeat(30)).is_ok());
    }

    #[test]
    fn phone_number_must_be_numeric() {
        assert!(PhoneNumber::new("3001234567").is_ok());
        assert_eq!(
            PhoneNumber::new("+57 300"),
            Err(TypeConstraintError::NotNumeric)
        );
    }

    #[test]
    fn email_is_normalized() {
        let email = EmailAddress::new("  Ana.Garcia@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "ana.garcia@example.com");
        assert_eq!(
            EmailAddress::new("not-an-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
    }

    #[test]
    fn bounded_strings_enforce_limits() {
        assert!(AddressLine::new("Calle 10 # 5-20").is_ok());
        assert_eq!(
            AddressType::new("x".repeat(31)),
            Err(TypeConstraintError::TooLong(ADDRESS_TYPE_MAX_LEN))
        );
        assert_eq!(PhoneType::new(""), Err(TypeConstraintError::EmptyString));
    }
}
