//! Read-only projections returned by the person search queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{MAX_DATE_YEAR, MIN_DATE_YEAR, TypeConstraintError, is_storable_date};

/// Match of a name or document-number search.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonDocumentMatch {
    pub document_number: String,
    pub full_name: String,
}

/// Match of a birth-date range search.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonBirthDateMatch {
    pub birth_date: NaiveDate,
    pub full_name: String,
}

/// Person owning more than one phone.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonPhoneCount {
    pub full_name: String,
    pub phone_count: i64,
}

/// Person owning more than one address, with the earliest one recorded.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonFirstAddress {
    pub full_name: String,
    pub first_address: String,
}

/// Inclusive birth-date interval with `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BirthDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl BirthDateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TypeConstraintError> {
        if !is_storable_date(start) || !is_storable_date(end) {
            return Err(TypeConstraintError::InvalidValue(format!(
                "years must be between {MIN_DATE_YEAR} and {MAX_DATE_YEAR}"
            )));
        }
        if start > end {
            return Err(TypeConstraintError::InvalidValue(
                "start date cannot be after end date".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    pub const fn end(&self) -> NaiveDate {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn range_rejects_reversed_bounds() {
        assert!(BirthDateRange::new(date(2020, 1, 2), date(2020, 1, 1)).is_err());
    }

    #[test]
    fn range_accepts_a_single_day() {
        let range = BirthDateRange::new(date(2000, 5, 5), date(2000, 5, 5)).unwrap();
        assert_eq!(range.start(), date(2000, 5, 5));
        assert_eq!(range.end(), date(2000, 5, 5));
    }

    #[test]
    fn range_rejects_years_outside_four_digits() {
        assert!(BirthDateRange::new(date(1970, 1, 1), date(10000, 1, 1)).is_err());
        assert!(BirthDateRange::new(date(-1000, 1, 1), date(-100, 1, 1)).is_err());
        assert!(BirthDateRange::new(date(1, 1, 1), date(9999, 12, 31)).is_ok());
    }
}
