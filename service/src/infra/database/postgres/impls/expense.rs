//! [`Expense`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    Money,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tracerr::Traced;

use crate::{
    domain::{expense, Expense},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

use super::sql_limit;

impl<C> Database<Select<By<Option<Expense>, expense::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Expense>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Expense>, expense::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: expense::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, description, amount, currency, category, date, \
                   created_at \
            FROM expenses \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Expense {
                id: row.get("id"),
                description: row.get("description"),
                amount: Money {
                    amount: row.get("amount"),
                    currency: row.get("currency"),
                },
                category: row.get("category"),
                date: row.get("date"),
                created_at: row.get("created_at"),
            }))
    }
}

impl<C> Database<Insert<Expense>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Expense>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(expense): Insert<Expense>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(expense))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Expense>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(expense): Update<Expense>,
    ) -> Result<Self::Ok, Self::Err> {
        let Expense {
            id,
            description,
            amount,
            category,
            date,
            created_at,
        } = expense;

        const SQL: &str = "\
            INSERT INTO expenses (\
                id, description, amount, currency, category, date, \
                created_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::NUMERIC, $4::INT2, $5::INT2, \
                $6::DATE, \
                $7::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET description = EXCLUDED.description, \
                amount = EXCLUDED.amount, \
                currency = EXCLUDED.currency, \
                category = EXCLUDED.category, \
                date = EXCLUDED.date";
        self.exec(
            SQL,
            &[
                &id,
                &description,
                &amount.amount,
                &amount.currency,
                &category,
                &date,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Expense, expense::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Expense, expense::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: expense::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM expenses \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<
        Select<By<read::expense::list::Page, read::expense::list::Selector>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::expense::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::expense::list::Page, read::expense::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::expense::list::Selector {
            arguments,
            filter: read::expense::list::Filter { category },
        } = by.into_inner();

        let limit = sql_limit(arguments.limit()).saturating_add(1);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });
        let category_idx = category.as_ref().map(|c| {
            ps.push(c);
            ps.len()
        });

        let sql = format!(
            "SELECT id \
             FROM expenses \
             WHERE true \
                   {cursor} \
                   {category_filtering} \
             ORDER BY id {order} \
             LIMIT $1::INT4",
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                let op = arguments.kind().operator();
                f(&format_args!("AND id {op} ${idx}::UUID"))
            }),
            category_filtering =
                category_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND category = ${idx}::INT2"))
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

        Ok(read::expense::list::Page::new(&arguments, edges, has_more))
    }
}

impl<C>
    Database<
        Select<
            By<read::expense::list::TotalCount, read::expense::list::Filter>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::expense::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::expense::list::TotalCount, read::expense::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::expense::list::Filter { category } = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM expenses \
            WHERE $1::INT2 IS NULL \
               OR category = $1::INT2";
        self.query_opt(SQL, &[&category])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.map_or(0, |r| r.get::<_, i32>(0)).into())
    }
}
