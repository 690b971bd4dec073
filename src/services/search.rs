//! Read-only search use cases. Every search reports `NotFound` on an empty
//! result.

use chrono::NaiveDate;

use crate::domain::search::{
    BirthDateRange, PersonBirthDateMatch, PersonDocumentMatch, PersonFirstAddress,
    PersonPhoneCount,
};
use crate::domain::types::{MAX_DATE_YEAR, MIN_DATE_YEAR, is_numeric, is_storable_date};
use crate::forms::search::{BirthDateQuery, DocumentQuery, NameQuery};
use crate::repository::PersonSearch;
use crate::services::{ServiceError, ServiceResult};

fn non_empty<T>(items: Vec<T>, message: &str) -> ServiceResult<Vec<T>> {
    if items.is_empty() {
        Err(ServiceError::NotFound(message.to_string()))
    } else {
        Ok(items)
    }
}

fn parse_date(value: &str) -> ServiceResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ServiceError::BadRequest(format!(
            "Invalid date '{value}'. Dates must use the YYYY-MM-DD format."
        ))
    })?;

    if !is_storable_date(date) {
        return Err(ServiceError::BadRequest(format!(
            "Invalid date '{value}'. Years must be between {MIN_DATE_YEAR} and {MAX_DATE_YEAR}."
        )));
    }

    Ok(date)
}

pub fn search_by_name<R>(repo: &R, query: NameQuery) -> ServiceResult<Vec<PersonDocumentMatch>>
where
    R: PersonSearch + ?Sized,
{
    // Matched as sent; surrounding spaces are part of the fragment.
    let name = query
        .name
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ServiceError::BadRequest("The name parameter is required.".to_string()))?;

    let matches = repo.search_people_by_name(&name).map_err(|err| {
        log::error!("Failed to search people by name: {err}");
        err
    })?;

    non_empty(matches, "No clients found with the given name.")
}

pub fn search_by_document<R>(
    repo: &R,
    query: DocumentQuery,
) -> ServiceResult<Vec<PersonDocumentMatch>>
where
    R: PersonSearch + ?Sized,
{
    let document_number = query
        .document_number
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            ServiceError::BadRequest("The document number parameter is required.".to_string())
        })?;

    if !is_numeric(&document_number) {
        return Err(ServiceError::BadRequest(
            "The document number can only contain numbers.".to_string(),
        ));
    }

    let matches = repo
        .search_people_by_document(&document_number)
        .map_err(|err| {
            log::error!("Failed to search people by document: {err}");
            err
        })?;

    non_empty(matches, "No clients found with the given document number.")
}

/// Inclusive birth-date search. Both bounds are required and must be ordered.
pub fn search_by_birth_date<R>(
    repo: &R,
    query: BirthDateQuery,
) -> ServiceResult<Vec<PersonBirthDateMatch>>
where
    R: PersonSearch + ?Sized,
{
    let (Some(start), Some(end)) = (query.start_date, query.end_date) else {
        return Err(ServiceError::BadRequest(
            "The start date and end date parameters are required.".to_string(),
        ));
    };

    let range = BirthDateRange::new(parse_date(&start)?, parse_date(&end)?).map_err(|_| {
        ServiceError::BadRequest("Start date cannot be after end date.".to_string())
    })?;

    let matches = repo.search_people_by_birth_date(range).map_err(|err| {
        log::error!("Failed to search people by birth date: {err}");
        err
    })?;

    non_empty(matches, "No clients found within the given date range.")
}

pub fn people_with_multiple_phones<R>(repo: &R) -> ServiceResult<Vec<PersonPhoneCount>>
where
    R: PersonSearch + ?Sized,
{
    let matches = repo.people_with_multiple_phones().map_err(|err| {
        log::error!("Failed to list people with multiple phones: {err}");
        err
    })?;

    non_empty(matches, "No clients found with multiple phone numbers.")
}

pub fn people_with_multiple_addresses<R>(repo: &R) -> ServiceResult<Vec<PersonFirstAddress>>
where
    R: PersonSearch + ?Sized,
{
    let matches = repo.people_with_multiple_addresses().map_err(|err| {
        log::error!("Failed to list people with multiple addresses: {err}");
        err
    })?;

    non_empty(matches, "No clients found with multiple addresses.")
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn blank_name_is_rejected_without_query() {
        let mut repo = MockRepository::new();
        repo.expect_search_people_by_name().times(0);

        let result = search_by_name(
            &repo,
            NameQuery {
                name: Some("   ".into()),
            },
        );

        assert!(
            matches!(result, Err(ServiceError::BadRequest(msg)) if msg == "The name parameter is required.")
        );
    }

    #[test]
    fn name_search_passes_fragment_untouched() {
        let mut repo = MockRepository::new();
        repo.expect_search_people_by_name()
            .withf(|fragment| fragment == " Garcia ")
            .times(1)
            .returning(|_| {
                Ok(vec![PersonDocumentMatch {
                    document_number: "52000111".into(),
                    full_name: "Ana Garcia".into(),
                }])
            });

        let matches = search_by_name(
            &repo,
            NameQuery {
                name: Some(" Garcia ".into()),
            },
        )
        .expect("should find");

        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn empty_name_search_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_search_people_by_name()
            .times(1)
            .returning(|_| Ok(vec![]));

        let result = search_by_name(
            &repo,
            NameQuery {
                name: Some("Zapata".into()),
            },
        );

        assert!(
            matches!(result, Err(ServiceError::NotFound(msg)) if msg == "No clients found with the given name.")
        );
    }

    #[test]
    fn document_search_requires_digits() {
        let mut repo = MockRepository::new();
        repo.expect_search_people_by_document().times(0);

        let result = search_by_document(
            &repo,
            DocumentQuery {
                document_number: Some("12-3".into()),
            },
        );

        assert!(matches!(
            result,
            Err(ServiceError::BadRequest(msg)) if msg == "The document number can only contain numbers."
        ));
    }

    #[test]
    fn reversed_date_range_does_not_query() {
        let mut repo = MockRepository::new();
        repo.expect_search_people_by_birth_date().times(0);

        let result = search_by_birth_date(
            &repo,
            BirthDateQuery {
                start_date: Some("2000-01-02".into()),
                end_date: Some("2000-01-01".into()),
            },
        );

        assert!(matches!(
            result,
            Err(ServiceError::BadRequest(msg)) if msg == "Start date cannot be after end date."
        ));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_search_people_by_birth_date().times(0);

        let result = search_by_birth_date(
            &repo,
            BirthDateQuery {
                start_date: Some("01/02/2000".into()),
                end_date: Some("2000-01-01".into()),
            },
        );

        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    }

    #[test]
    fn signed_or_five_digit_years_are_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_search_people_by_birth_date().times(0);

        for (start, end) in [("1970-01-01", "+10000-01-01"), ("-1000-01-01", "-0100-01-01")] {
            let result = search_by_birth_date(
                &repo,
                BirthDateQuery {
                    start_date: Some(start.into()),
                    end_date: Some(end.into()),
                },
            );

            assert!(matches!(result, Err(ServiceError::BadRequest(_))));
        }
    }

    #[test]
    fn birth_date_range_is_inclusive_on_both_ends() {
        let mut repo = MockRepository::new();
        repo.expect_search_people_by_birth_date()
            .withf(|range| range.start() == date(1990, 1, 1) && range.end() == date(1990, 1, 1))
            .times(1)
            .returning(|_| {
                Ok(vec![PersonBirthDateMatch {
                    birth_date: date(1990, 1, 1),
                    full_name: "Ana Garcia".into(),
                }])
            });

        let matches = search_by_birth_date(
            &repo,
            BirthDateQuery {
                start_date: Some("1990-01-01".into()),
                end_date: Some("1990-01-01".into()),
            },
        )
        .expect("should find");

        assert_eq!(matches[0].birth_date, date(1990, 1, 1));
    }

    #[test]
    fn no_multi_phone_owners_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_people_with_multiple_phones()
            .times(1)
            .returning(|| Ok(vec![]));

        let result = people_with_multiple_phones(&repo);

        assert!(matches!(
            result,
            Err(ServiceError::NotFound(msg)) if msg == "No clients found with multiple phone numbers."
        ));
    }

    #[test]
    fn multi_address_owners_are_returned() {
        let mut repo = MockRepository::new();
        repo.expect_people_with_multiple_addresses()
            .times(1)
            .returning(|| {
                Ok(vec![PersonFirstAddress {
                    full_name: "Ana Garcia".into(),
                    first_address: "Calle 1".into(),
                }])
            });

        let matches = people_with_multiple_addresses(&repo).expect("should find");

        assert_eq!(matches[0].first_address, "Calle 1");
    }
}
