//! Read-only search queries over person records.

use std::cmp::Reverse;
use std::collections::HashMap;

use diesel::dsl::count;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::search::{
        BirthDateRange, PersonBirthDateMatch, PersonDocumentMatch, PersonFirstAddress,
        PersonPhoneCount,
    },
    models::{address::Address as DbAddress, person::Person as DbPerson},
    repository::{DieselRepository, PersonSearch, errors::RepositoryResult},
};

/// Loads the given people keyed by id.
fn people_by_id(
    conn: &mut SqliteConnection,
    ids: &[i32],
) -> RepositoryResult<HashMap<i32, DbPerson>> {
    use crate::schema::people;

    let people = people::table
        .filter(people::id.eq_any(ids))
        .select(DbPerson::as_select())
        .load::<DbPerson>(conn)?;

    Ok(people.into_iter().map(|p| (p.id, p)).collect())
}

fn document_match(person: &DbPerson) -> PersonDocumentMatch {
    PersonDocumentMatch {
        document_number: person.document_number.clone(),
        full_name: person.full_name(),
    }
}

impl PersonSearch for DieselRepository {
    fn search_people_by_name(
        &self,
        fragment: &str,
    ) -> RepositoryResult<Vec<PersonDocumentMatch>> {
        use crate::schema::people;

        let mut conn = self.conn()?;
        let pattern = format!("%{fragment}%");

        // SQLite LIKE ignores ASCII case, so it only narrows the candidates.
        let candidates = people::table
            .filter(
                people::names
                    .like(&pattern)
                    .or(people::last_name1.like(&pattern))
                    .or(people::last_name2.assume_not_null().like(&pattern)),
            )
            .order((people::names.asc(), people::id.asc()))
            .select(DbPerson::as_select())
            .load::<DbPerson>(&mut conn)?;

        Ok(candidates
            .iter()
            .filter(|p| {
                p.names.contains(fragment)
                    || p.last_name1.contains(fragment)
                    || p
                        .last_name2
                        .as_deref()
                        .is_some_and(|last_name2| last_name2.contains(fragment))
            })
            .map(document_match)
            .collect())
    }

    fn search_people_by_document(
        &self,
        fragment: &str,
    ) -> RepositoryResult<Vec<PersonDocumentMatch>> {
        use crate::schema::people;

        let mut conn = self.conn()?;
        let pattern = format!("%{fragment}%");

        let mut matches = people::table
            .filter(people::document_number.like(&pattern))
            .order(people::id.asc())
            .select(DbPerson::as_select())
            .load::<DbPerson>(&mut conn)?;

        // Stable sort keeps id order between equal numeric values ("007" vs "7").
        matches.sort_by_key(|p| Reverse(p.document_number.parse::<u64>().unwrap_or_default()));

        Ok(matches.iter().map(document_match).collect())
    }

    fn search_people_by_birth_date(
        &self,
        range: BirthDateRange,
    ) -> RepositoryResult<Vec<PersonBirthDateMatch>> {
        use crate::schema::people;

        let mut conn = self.conn()?;

        let matches = people::table
            .filter(people::birth_date.between(range.start(), range.end()))
            .order((people::birth_date.asc(), people::id.asc()))
            .select(DbPerson::as_select())
            .load::<DbPerson>(&mut conn)?;

        Ok(matches
            .iter()
            .map(|p| PersonBirthDateMatch {
                birth_date: p.birth_date,
                full_name: p.full_name(),
            })
            .collect())
    }

    fn people_with_multiple_phones(&self) -> RepositoryResult<Vec<PersonPhoneCount>> {
        use crate::schema::phones;

        let mut conn = self.conn()?;

        let counts = phones::table
            .group_by(phones::person_id)
            .select((phones::person_id, count(phones::id)))
            .having(count(phones::id).gt(1_i64))
            .order(phones::person_id.asc())
            .load::<(i32, i64)>(&mut conn)?;

        let ids = counts.iter().map(|(id, _)| *id).collect::<Vec<_>>();
        let people = people_by_id(&mut conn, &ids)?;

        Ok(counts
            .into_iter()
            .filter_map(|(id, phone_count)| {
                people.get(&id).map(|person| PersonPhoneCount {
                    full_name: person.full_name(),
                    phone_count,
                })
            })
            .collect())
    }

    fn people_with_multiple_addresses(&self) -> RepositoryResult<Vec<PersonFirstAddress>> {
        use crate::schema::addresses;

        let mut conn = self.conn()?;

        let owners = addresses::table
            .group_by(addresses::person_id)
            .select(addresses::person_id)
            .having(count(addresses::id).gt(1_i64))
            .order(addresses::person_id.asc())
            .load::<i32>(&mut conn)?;

        if owners.is_empty() {
            return Ok(Vec::new());
        }

        let owned = addresses::table
            .filter(addresses::person_id.eq_any(&owners))
            .order(addresses::id.asc())
            .select(DbAddress::as_select())
            .load::<DbAddress>(&mut conn)?;

        let mut first_lines: HashMap<i32, String> = HashMap::new();
        for address in owned {
            first_lines
                .entry(address.person_id)
                .or_insert(address.address_line);
        }

        let people = people_by_id(&mut conn, &owners)?;

        Ok(owners
            .iter()
            .filter_map(|id| {
                let person = people.get(id)?;
                let first_address = first_lines.get(id)?.clone();
                Some(PersonFirstAddress {
                    full_name: person.full_name(),
                    first_address,
                })
            })
            .collect())
    }
}
