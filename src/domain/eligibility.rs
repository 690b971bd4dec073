//! Age-to-document-type eligibility rule.
//!
//! Colombian identity documents are tied to age brackets: a Registro Civil up
//! to seven years, a Tarjeta de Identidad from eight to seventeen and a Cédula
//! de Ciudadanía from eighteen on. The rule is evaluated against an explicit
//! `today` so callers decide which clock applies.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::domain::types::DocumentType;

/// Reasons a document type is rejected for a birth date.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EligibilityError {
    #[error("For ages 0-7, only 'Registro Civil (RC)' is allowed.")]
    RegistroCivilRequired,
    #[error("For ages 8-17, only 'Tarjeta Identidad (TI)' is allowed.")]
    TarjetaIdentidadRequired,
    #[error("For ages 18 and above, only 'Cédula de Ciudadanía (CC)' is allowed.")]
    CedulaCiudadaniaRequired,
    #[error("Birth date cannot be in the future.")]
    BirthDateInFuture,
}

/// Whole years elapsed between `birth_date` and `today`.
///
/// The year difference is reduced by one while this year's birthday is still
/// ahead. Negative when `birth_date` is after `today`.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// Document type required for the given age, `None` for negative ages.
pub fn required_document_type(age: i32) -> Option<DocumentType> {
    match age {
        0..=7 => Some(DocumentType::RegistroCivil),
        8..=17 => Some(DocumentType::TarjetaIdentidad),
        18.. => Some(DocumentType::CedulaCiudadania),
        _ => None,
    }
}

/// Checks that `document_type` is the one required for the holder's age.
pub fn check_document_type_for_age(
    birth_date: NaiveDate,
    document_type: DocumentType,
    today: NaiveDate,
) -> Result<(), EligibilityError> {
    let required = required_document_type(age_on(birth_date, today))
        .ok_or(EligibilityError::BirthDateInFuture)?;

    if required == document_type {
        return Ok(());
    }

    Err(match required {
        DocumentType::RegistroCivil => EligibilityError::RegistroCivilRequired,
        DocumentType::TarjetaIdentidad => EligibilityError::TarjetaIdentidadRequired,
        DocumentType::CedulaCiudadania => EligibilityError::CedulaCiudadaniaRequired,
    })
}
