//! [`Customer`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{customer, Customer},
    infra::{
        database::{
            self,
            postgres::{Connection, FuzzPattern},
            Postgres,
        },
        Database,
    },
    read,
};

use super::sql_limit;

impl<C, Phones> Database<Select<By<HashMap<customer::Phone, Customer>, Phones>>>
    for Postgres<C>
where
    C: Connection,
    Phones: AsRef<[customer::Phone]>,
{
    type Ok = HashMap<customer::Phone, Customer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<customer::Phone, Customer>, Phones>>,
    ) -> Result<Self::Ok, Self::Err> {
        let phones = by.into_inner();
        // Avoid subtle change for SQL.
        let phones: &[customer::Phone] = phones.as_ref();
        if phones.is_empty() {
            return Ok(HashMap::new());
        }
        let limit = sql_limit(phones.len());

        const SQL: &str = "\
            SELECT phone, name, email, password_hash, \
                   additional_phone, \
                   documents_url, photo_id_proof_url, id_proof_urls, \
                   remarks, \
                   created_at, updated_at \
            FROM customers \
            WHERE phone IN (SELECT unnest($1::VARCHAR[]) LIMIT $2::INT4) \
            LIMIT $2::INT4";
        Ok(self
            .query(SQL, &[&phones, &limit])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| {
                let phone: customer::Phone = row.get("phone");
                (
                    phone.clone(),
                    Customer {
                        phone,
                        name: row.get("name"),
                        email: row.get("email"),
                        password_hash: row.get("password_hash"),
                        additional_phone: row.get("additional_phone"),
                        documents_url: row.get("documents_url"),
                        photo_id_proof_url: row.get("photo_id_proof_url"),
                        id_proof_urls: row.get("id_proof_urls"),
                        remarks: row.get("remarks"),
                        created_at: row.get("created_at"),
                        updated_at: row.get("updated_at"),
                    },
                )
            })
            .collect())
    }
}

impl<'p, C> Database<Select<By<Option<Customer>, &'p customer::Phone>>>
    for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<customer::Phone, Customer>, [customer::Phone; 1]>>,
        Ok = HashMap<customer::Phone, Customer>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Customer>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Customer>, &'p customer::Phone>>,
    ) -> Result<Self::Ok, Self::Err> {
        let phone = by.into_inner();
        Ok(self
            .execute(Select(By::new([phone.clone()])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(phone))
    }
}

impl<C> Database<Insert<Customer>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Customer>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(customer): Insert<Customer>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(customer))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Customer>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(customer): Update<Customer>,
    ) -> Result<Self::Ok, Self::Err> {
        let Customer {
            phone,
            name,
            email,
            password_hash,
            additional_phone,
            documents_url,
            photo_id_proof_url,
            id_proof_urls,
            remarks,
            created_at,
            updated_at,
        } = customer;

        const SQL: &str = "\
            INSERT INTO customers (\
                phone, name, email, password_hash, \
                additional_phone, \
                documents_url, photo_id_proof_url, id_proof_urls, \
                remarks, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::VARCHAR, $2::VARCHAR, $3::VARCHAR, $4::VARCHAR, \
                $5::VARCHAR, \
                $6::VARCHAR, $7::VARCHAR, $8::VARCHAR[], \
                $9::VARCHAR, \
                $10::TIMESTAMPTZ, $11::TIMESTAMPTZ\
            ) \
            ON CONFLICT (phone) DO UPDATE \
            SET name = EXCLUDED.name, \
                email = EXCLUDED.email, \
                password_hash = EXCLUDED.password_hash, \
                additional_phone = EXCLUDED.additional_phone, \
                documents_url = EXCLUDED.documents_url, \
                photo_id_proof_url = EXCLUDED.photo_id_proof_url, \
                id_proof_urls = EXCLUDED.id_proof_urls, \
                remarks = EXCLUDED.remarks, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &phone,
                &name,
                &email,
                &password_hash,
                &additional_phone,
                &documents_url,
                &photo_id_proof_url,
                &id_proof_urls,
                &remarks,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<'p, C> Database<Delete<By<Customer, &'p customer::Phone>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Customer, &'p customer::Phone>>,
    ) -> Result<Self::Ok, Self::Err> {
        let phone = by.into_inner();

        const SQL: &str = "\
            DELETE FROM customers \
            WHERE phone = $1::VARCHAR";
        self.exec(SQL, &[phone])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<'p, C> Database<Lock<By<Customer, &'p customer::Phone>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Customer, &'p customer::Phone>>,
    ) -> Result<Self::Ok, Self::Err> {
        let phone = by.into_inner();

        // Updating the existing row holds its lock till the end of the
        // transaction.
        const SQL: &str = "\
            INSERT INTO customers_lock \
            VALUES ($1::VARCHAR) \
            ON CONFLICT (phone) DO UPDATE \
            SET phone = EXCLUDED.phone";
        self.exec(SQL, &[phone])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<'p, C> Database<Select<By<read::customer::InUse, &'p customer::Phone>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::customer::InUse;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::customer::InUse, &'p customer::Phone>>,
    ) -> Result<Self::Ok, Self::Err> {
        let phone = by.into_inner();

        const SQL: &str = "\
            SELECT EXISTS(SELECT 1 \
                          FROM bookings \
                          WHERE customer_phone = $1::VARCHAR) \
                OR EXISTS(SELECT 1 \
                          FROM booking_requests \
                          WHERE customer_phone = $1::VARCHAR)";
        self.query_opt(SQL, &[phone])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                read::customer::InUse(row.is_some_and(|r| r.get::<_, bool>(0)))
            })
    }
}

impl<C>
    Database<
        Select<
            By<read::customer::list::Page, read::customer::list::Selector>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::customer::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::customer::list::Page, read::customer::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::customer::list::Selector {
            arguments,
            filter: read::customer::list::Filter { name },
        } = by.into_inner();

        let limit = sql_limit(arguments.limit()).saturating_add(1);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });
        let name_idx = name.as_ref().map(|n| {
            ps.push(n);
            ps.len()
        });

        let name_pattern = name.as_ref().map(|n| FuzzPattern::new(n.as_ref()));
        let name_pattern_idx = name_pattern.as_ref().map(|n| {
            ps.push(n);
            ps.len()
        });

        let sql = format!(
            "SELECT phone \
             FROM customers \
             WHERE true \
                   {cursor} \
                   {name_filtering} \
             ORDER BY {name_ordering} \
                      phone {order} \
             LIMIT $1::INT4",
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                let op = arguments.kind().operator();
                f(&format_args!("AND phone {op} ${idx}::VARCHAR"))
            }),
            order = arguments.kind().order().sql(),
            name_filtering =
                name_pattern_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!(
                        "AND LOWER(name) SIMILAR TO LOWER(${idx}::VARCHAR)"
                    ))
                }),
            name_ordering = name_idx.into_iter().format_with("", |idx, f| {
                let order = arguments.kind().order().sql();
                f(&format_args!(
                    "LEVENSHTEIN(name, ${idx}::VARCHAR, 1, 1, 0) {order},"
                ))
            }),
        );
        let rows = self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?;

        let has_more = rows.len() > arguments.limit();
        let edges = rows
            .into_iter()
            .take(arguments.limit())
            .map(|row| {
                let phone: customer::Phone = row.get("phone");
                (phone.clone(), phone)
            })
            .collect::<Vec<_>>();

        Ok(read::customer::list::Page::new(&arguments, edges, has_more))
    }
}

impl<C>
    Database<
        Select<
            By<read::customer::list::TotalCount, read::customer::list::Filter>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::customer::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::customer::list::TotalCount, read::customer::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::customer::list::Filter { name } = by.into_inner();
        let name_pattern = name.as_ref().map(|n| FuzzPattern::new(n.as_ref()));

        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM customers \
            WHERE $1::VARCHAR IS NULL \
               OR LOWER(name) SIMILAR TO LOWER($1::VARCHAR)";
        self.query_opt(SQL, &[&name_pattern])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.map_or(0, |r| r.get::<_, i32>(0)).into())
    }
}
