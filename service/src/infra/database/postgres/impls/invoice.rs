//! [`Invoice`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Money,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{invoice, Invoice},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

use super::sql_limit;

impl<C> Database<Select<By<Option<Invoice>, invoice::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Invoice>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Invoice>, invoice::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: invoice::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, booking_id, number, \
                   total_amount, tax, discount, final_amount, currency, \
                   status, pdf_url, \
                   created_at \
            FROM invoices \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| {
                let currency = row.get("currency");
                let money = |column: &str| Money {
                    amount: row.get(column),
                    currency,
                };
                Invoice {
                    id: row.get("id"),
                    booking_id: row.get("booking_id"),
                    number: row.get("number"),
                    amounts: invoice::Amounts {
                        total: money("total_amount"),
                        tax: money("tax"),
                        discount: money("discount"),
                        r#final: money("final_amount"),
                    },
                    status: row.get("status"),
                    pdf_url: row.get("pdf_url"),
                    created_at: row.get("created_at"),
                }
            }))
    }
}

impl<C> Database<Insert<Invoice>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Invoice>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(invoice): Insert<Invoice>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(invoice))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Invoice>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(invoice): Update<Invoice>,
    ) -> Result<Self::Ok, Self::Err> {
        let Invoice {
            id,
            booking_id,
            number,
            amounts,
            status,
            pdf_url,
            created_at,
        } = invoice;

        const SQL: &str = "\
            INSERT INTO invoices (\
                id, booking_id, number, \
                total_amount, tax, discount, final_amount, currency, \
                status, pdf_url, \
                created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::VARCHAR, \
                $4::NUMERIC, $5::NUMERIC, $6::NUMERIC, $7::NUMERIC, \
                $8::INT2, \
                $9::INT2, $10::VARCHAR, \
                $11::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET total_amount = EXCLUDED.total_amount, \
                tax = EXCLUDED.tax, \
                discount = EXCLUDED.discount, \
                final_amount = EXCLUDED.final_amount, \
                currency = EXCLUDED.currency, \
                status = EXCLUDED.status, \
                pdf_url = EXCLUDED.pdf_url";
        self.exec(
            SQL,
            &[
                &id,
                &booking_id,
                &number,
                &amounts.total.amount,
                &amounts.tax.amount,
                &amounts.discount.amount,
                &amounts.r#final.amount,
                &amounts.total.currency,
                &status,
                &pdf_url,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Invoice, invoice::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Invoice, invoice::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: invoice::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM invoices \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<
        Select<By<read::invoice::list::Page, read::invoice::list::Selector>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::invoice::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::invoice::list::Page, read::invoice::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::invoice::list::Selector {
            arguments,
            filter: read::invoice::list::Filter { booking_id },
        } = by.into_inner();

        let limit = sql_limit(arguments.limit()).saturating_add(1);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });
        let booking_idx = booking_id.as_ref().map(|id| {
            ps.push(id);
            ps.len()
        });

        let sql = format!(
            "SELECT id \
             FROM invoices \
             WHERE true \
                   {cursor} \
                   {booking_filtering} \
             ORDER BY id {order} \
             LIMIT $1::INT4",
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                let op = arguments.kind().operator();
                f(&format_args!("AND id {op} ${idx}::UUID"))
            }),
            booking_filtering =
                booking_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND booking_id = ${idx}::UUID"))
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

        Ok(read::invoice::list::Page::new(&arguments, edges, has_more))
    }
}

impl<C>
    Database<
        Select<
            By<read::invoice::list::TotalCount, read::invoice::list::Filter>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::invoice::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::invoice::list::TotalCount, read::invoice::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::invoice::list::Filter { booking_id } = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM invoices \
            WHERE $1::UUID IS NULL \
               OR booking_id = $1::UUID";
        self.query_opt(SQL, &[&booking_id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.map_or(0, |r| r.get::<_, i32>(0)).into())
    }
}
