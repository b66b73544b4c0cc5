//! [`Payment`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Money,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{booking, payment, Payment},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

use super::sql_limit;

impl<C> Database<Select<By<Option<Payment>, payment::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Payment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Payment>, payment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: payment::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, booking_id, amount, currency, method, status, \
                   screenshot_url, transaction_id, \
                   paid_at, created_at \
            FROM payments \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(payment_from_row))
    }
}

impl<C> Database<Select<By<Vec<Payment>, Vec<booking::Id>>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Payment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Payment>, Vec<booking::Id>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let booking_ids = by.into_inner();
        if booking_ids.is_empty() {
            return Ok(vec![]);
        }

        const SQL: &str = "\
            SELECT id, booking_id, amount, currency, method, status, \
                   screenshot_url, transaction_id, \
                   paid_at, created_at \
            FROM payments \
            WHERE booking_id = ANY($1::UUID[]) \
            ORDER BY paid_at ASC";
        Ok(self
            .query(SQL, &[&booking_ids])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(payment_from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Payment>, booking::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Vec<Payment>, Vec<booking::Id>>>,
        Ok = Vec<Payment>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Payment>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Payment>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let booking_id = by.into_inner();
        self.execute(Select(By::<Vec<Payment>, _>::new(vec![booking_id])))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Payment>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Payment>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(payment): Insert<Payment>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(payment))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Payment>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(payment): Update<Payment>,
    ) -> Result<Self::Ok, Self::Err> {
        let Payment {
            id,
            booking_id,
            amount,
            method,
            status,
            screenshot_url,
            transaction_id,
            paid_at,
            created_at,
        } = payment;

        const SQL: &str = "\
            INSERT INTO payments (\
                id, booking_id, amount, currency, method, status, \
                screenshot_url, transaction_id, \
                paid_at, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::NUMERIC, $4::INT2, $5::INT2, $6::INT2, \
                $7::VARCHAR, $8::VARCHAR, \
                $9::TIMESTAMPTZ, $10::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET booking_id = EXCLUDED.booking_id, \
                amount = EXCLUDED.amount, \
                currency = EXCLUDED.currency, \
                method = EXCLUDED.method, \
                status = EXCLUDED.status, \
                screenshot_url = EXCLUDED.screenshot_url, \
                transaction_id = EXCLUDED.transaction_id, \
                paid_at = EXCLUDED.paid_at";
        self.exec(
            SQL,
            &[
                &id,
                &booking_id,
                &amount.amount,
                &amount.currency,
                &method,
                &status,
                &screenshot_url,
                &transaction_id,
                &paid_at,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Payment, payment::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Payment, payment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: payment::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM payments \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<
        Select<By<read::payment::list::Page, read::payment::list::Selector>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::payment::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::payment::list::Page, read::payment::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::payment::list::Selector {
            arguments,
            filter: read::payment::list::Filter { booking_id, status },
        } = by.into_inner();

        let limit = sql_limit(arguments.limit()).saturating_add(1);

        let mut ps: Vec<&(dyn ToSql + Sync)> =
            vec![&limit, &booking_id, &status];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });

        let sql = format!(
            "SELECT id \
             FROM payments \
             WHERE ($2::UUID IS NULL OR booking_id = $2::UUID) \
               AND ($3::INT2 IS NULL OR status = $3::INT2) \
                   {cursor} \
             ORDER BY id {order} \
             LIMIT $1::INT4",
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                let op = arguments.kind().operator();
                f(&format_args!("AND id {op} ${idx}::UUID"))
            }),
            order = arguments.kind().order().sql(),
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
                let id = row.get("id");
                (id, id)
            })
            .collect::<Vec<_>>();

        Ok(read::payment::list::Page::new(&arguments, edges, has_more))
    }
}

impl<C>
    Database<
        Select<
            By<read::payment::list::TotalCount, read::payment::list::Filter>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::payment::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::payment::list::TotalCount, read::payment::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::payment::list::Filter { booking_id, status } =
            by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM payments \
            WHERE ($1::UUID IS NULL OR booking_id = $1::UUID) \
              AND ($2::INT2 IS NULL OR status = $2::INT2)";
        self.query_opt(SQL, &[&booking_id, &status])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.map_or(0, |r| r.get::<_, i32>(0)).into())
    }
}

/// Reads a [`Payment`] from the provided [`Row`].
fn payment_from_row(row: &Row) -> Payment {
    Payment {
        id: row.get("id"),
        booking_id: row.get("booking_id"),
        amount: Money {
            amount: row.get("amount"),
            currency: row.get("currency"),
        },
        method: row.get("method"),
        status: row.get("status"),
        screenshot_url: row.get("screenshot_url"),
        transaction_id: row.get("transaction_id"),
        paid_at: row.get("paid_at"),
        created_at: row.get("created_at"),
    }
}
