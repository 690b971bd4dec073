//! Repository implementation for person records and their contact rows.

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::{
    domain::{
        person::{NewAddress, NewEmail, NewPerson, NewPhone, Person, UpdatePerson},
        types::{DocumentNumber, DocumentType, PersonId},
    },
    models::{
        address::{Address as DbAddress, NewAddress as DbNewAddress},
        email::{Email as DbEmail, NewEmail as DbNewEmail},
        person::{NewPerson as DbNewPerson, Person as DbPerson, UpdatePerson as DbUpdatePerson},
        phone::{NewPhone as DbNewPhone, Phone as DbPhone},
    },
    repository::{
        DieselRepository, PersonReader, PersonWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

/// Attaches the contact collections to each person row, children ordered by id.
pub(crate) fn attach_children(
    conn: &mut SqliteConnection,
    people: Vec<DbPerson>,
) -> RepositoryResult<Vec<Person>> {
    use crate::schema::{addresses, emails, phones};

    let addresses = DbAddress::belonging_to(&people)
        .select(DbAddress::as_select())
        .order(addresses::id.asc())
        .load::<DbAddress>(conn)?
        .grouped_by(&people);
    let phones = DbPhone::belonging_to(&people)
        .select(DbPhone::as_select())
        .order(phones::id.asc())
        .load::<DbPhone>(conn)?
        .grouped_by(&people);
    let emails = DbEmail::belonging_to(&people)
        .select(DbEmail::as_select())
        .order(emails::id.asc())
        .load::<DbEmail>(conn)?
        .grouped_by(&people);

    people
        .into_iter()
        .zip(addresses)
        .zip(phones)
        .zip(emails)
        .map(|(((person, addresses), phones), emails)| {
            Person::try_from((person, addresses, phones, emails)).map_err(RepositoryError::from)
        })
        .collect()
}

fn load_person(conn: &mut SqliteConnection, id: i32) -> RepositoryResult<Option<Person>> {
    use crate::schema::people;

    let db_person = people::table
        .find(id)
        .select(DbPerson::as_select())
        .first::<DbPerson>(conn)
        .optional()?;

    match db_person {
        Some(db_person) => Ok(attach_children(conn, vec![db_person])?.pop()),
        None => Ok(None),
    }
}

fn insert_children(
    conn: &mut SqliteConnection,
    person_id: i32,
    addresses: &[NewAddress],
    phones: &[NewPhone],
    emails: &[NewEmail],
) -> RepositoryResult<()> {
    use crate::schema::{addresses, emails, phones};

    if !addresses.is_empty() {
        let rows = addresses
            .iter()
            .map(|address| DbNewAddress::new(person_id, address))
            .collect::<Vec<_>>();
        diesel::insert_into(addresses::table)
            .values(&rows)
            .execute(conn)?;
    }

    if !phones.is_empty() {
        let rows = phones
            .iter()
            .map(|phone| DbNewPhone::new(person_id, phone))
            .collect::<Vec<_>>();
        diesel::insert_into(phones::table)
            .values(&rows)
            .execute(conn)?;
    }

    if !emails.is_empty() {
        let rows = emails
            .iter()
            .map(|email| DbNewEmail::new(person_id, email))
            .collect::<Vec<_>>();
        diesel::insert_into(emails::table)
            .values(&rows)
            .execute(conn)?;
    }

    Ok(())
}

fn delete_children(conn: &mut SqliteConnection, person_id: i32) -> RepositoryResult<()> {
    use crate::schema::{addresses, emails, phones};

    diesel::delete(addresses::table.filter(addresses::person_id.eq(person_id))).execute(conn)?;
    diesel::delete(phones::table.filter(phones::person_id.eq(person_id))).execute(conn)?;
    diesel::delete(emails::table.filter(emails::person_id.eq(person_id))).execute(conn)?;

    Ok(())
}

impl PersonReader for DieselRepository {
    fn get_person_by_id(&self, id: PersonId) -> RepositoryResult<Option<Person>> {
        let mut conn = self.conn()?;
        load_person(&mut conn, id.get())
    }

    fn list_people(&self) -> RepositoryResult<Vec<Person>> {
        use crate::schema::people;

        let mut conn = self.conn()?;
        let db_people = people::table
            .order(people::id.asc())
            .select(DbPerson::as_select())
            .load::<DbPerson>(&mut conn)?;

        attach_children(&mut conn, db_people)
    }

    fn document_in_use(
        &self,
        document_type: DocumentType,
        document_number: &DocumentNumber,
        exclude: Option<PersonId>,
    ) -> RepositoryResult<bool> {
        use crate::schema::people;

        let mut conn = self.conn()?;
        let mut query = people::table
            .filter(people::document_type.eq(document_type.as_str()))
            .filter(people::document_number.eq(document_number.as_str()))
            .into_boxed();

        if let Some(exclude) = exclude {
            query = query.filter(people::id.ne(exclude.get()));
        }

        let total: i64 = query.count().get_result(&mut conn)?;
        Ok(total > 0)
    }
}

impl PersonWriter for DieselRepository {
    fn create_person(&self, new_person: &NewPerson) -> RepositoryResult<Person> {
        use crate::schema::people;

        let mut conn = self.conn()?;
        let db_new_person: DbNewPerson = new_person.into();

        conn.transaction::<Person, RepositoryError, _>(|conn| {
            let person_id = diesel::insert_into(people::table)
                .values(&db_new_person)
                .returning(people::id)
                .get_result::<i32>(conn)?;

            insert_children(
                conn,
                person_id,
                &new_person.addresses,
                &new_person.phones,
                &new_person.emails,
            )?;

            load_person(conn, person_id)?.ok_or(RepositoryError::NotFound)
        })
    }

    fn update_person(&self, id: PersonId, updates: &UpdatePerson) -> RepositoryResult<Person> {
        use crate::schema::people;

        let mut conn = self.conn()?;
        let db_updates: DbUpdatePerson = updates.into();

        conn.transaction::<Person, RepositoryError, _>(|conn| {
            let affected = diesel::update(people::table.find(id.get()))
                .set(&db_updates)
                .execute(conn)?;
            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }

            delete_children(conn, id.get())?;
            insert_children(
                conn,
                id.get(),
                &updates.addresses,
                &updates.phones,
                &updates.emails,
            )?;

            load_person(conn, id.get())?.ok_or(RepositoryError::NotFound)
        })
    }

    fn delete_person(&self, id: PersonId) -> RepositoryResult<()> {
        use crate::schema::people;

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            delete_children(conn, id.get())?;
            let affected = diesel::delete(people::table.find(id.get())).execute(conn)?;
            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }
            Ok(())
        })
    }
}
