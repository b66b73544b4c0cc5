//! [`Room`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::{
    operations::{By, Delete, Insert, Lock, Select, Update},
    Money,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        room::{self, configuration::PersonCount, Configuration},
        Room,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

use super::{money, sql_limit};

impl<C, IDs> Database<Select<By<HashMap<room::Id, Room>, IDs>>> for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[room::Id]>,
{
    type Ok = HashMap<room::Id, Room>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<room::Id, Room>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[room::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let limit = sql_limit(ids.len());

        const SQL: &str = "\
            SELECT id, number, bathroom, is_available, description, \
                   daily_cost, monthly_cost, currency, \
                   created_at, updated_at \
            FROM rooms \
            WHERE id IN (SELECT unnest($1::UUID[]) LIMIT $2::INT4) \
            LIMIT $2::INT4";
        Ok(self
            .query(SQL, &[&ids, &limit])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(room_from_row)
            .map(|r| (r.id, r))
            .collect())
    }
}

impl<C> Database<Select<By<Option<Room>, room::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<room::Id, Room>, [room::Id; 1]>>,
        Ok = HashMap<room::Id, Room>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Room>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Room>, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<'n, C> Database<Select<By<Option<Room>, &'n room::Number>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<Option<Room>, room::Id>>,
        Ok = Option<Room>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Room>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Room>, &'n room::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        let number = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM rooms \
            WHERE number = $1::VARCHAR \
            LIMIT 1";
        let Some(row) = self
            .query_opt(SQL, &[number])
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        self.execute(Select(By::new(row.get::<_, room::Id>("id"))))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Vec<Room>, read::room::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Room>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Room>, read::room::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::room::list::Filter { is_available } = by.into_inner();

        const SQL: &str = "\
            SELECT id, number, bathroom, is_available, description, \
                   daily_cost, monthly_cost, currency, \
                   created_at, updated_at \
            FROM rooms \
            WHERE $1::BOOLEAN IS NULL \
               OR is_available = $1::BOOLEAN \
            ORDER BY number ASC";
        Ok(self
            .query(SQL, &[&is_available])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(room_from_row)
            .collect())
    }
}

impl<C> Database<Insert<Room>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Room>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(room): Insert<Room>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(room)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Room>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(room): Update<Room>,
    ) -> Result<Self::Ok, Self::Err> {
        let Room {
            id,
            number,
            bathroom,
            is_available,
            description,
            daily_cost,
            monthly_cost,
            created_at,
            updated_at,
        } = room;

        let currency = daily_cost.or(monthly_cost).map(|m| m.currency);
        let daily_cost = daily_cost.map(|m| m.amount);
        let monthly_cost = monthly_cost.map(|m| m.amount);

        const SQL: &str = "\
            INSERT INTO rooms (\
                id, number, bathroom, is_available, description, \
                daily_cost, monthly_cost, currency, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::INT2, $4::BOOLEAN, $5::VARCHAR, \
                $6::NUMERIC, $7::NUMERIC, $8::INT2, \
                $9::TIMESTAMPTZ, $10::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET number = EXCLUDED.number, \
                bathroom = EXCLUDED.bathroom, \
                is_available = EXCLUDED.is_available, \
                description = EXCLUDED.description, \
                daily_cost = EXCLUDED.daily_cost, \
                monthly_cost = EXCLUDED.monthly_cost, \
                currency = EXCLUDED.currency, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &number,
                &bathroom,
                &is_available,
                &description,
                &daily_cost,
                &monthly_cost,
                &currency,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Room, room::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Room, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: room::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM rooms \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Room, room::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Room, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: room::Id = by.into_inner();

        // Updating the existing row holds its lock till the end of the
        // transaction.
        const SQL: &str = "\
            INSERT INTO rooms_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO UPDATE \
            SET id = EXCLUDED.id";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<'n, C> Database<Lock<By<Room, &'n room::Number>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Room, &'n room::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        let number = by.into_inner();

        // Updating the existing row holds its lock till the end of the
        // transaction.
        const SQL: &str = "\
            INSERT INTO rooms_number_lock \
            VALUES ($1::VARCHAR) \
            ON CONFLICT (number) DO UPDATE \
            SET number = EXCLUDED.number";
        self.exec(SQL, &[number])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<read::room::InUse, room::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::room::InUse;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::room::InUse, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: room::Id = by.into_inner();

        const SQL: &str = "\
            SELECT EXISTS(SELECT 1 \
                          FROM bookings \
                          WHERE room_id = $1::UUID) \
                OR EXISTS(SELECT 1 \
                          FROM booking_requests \
                          WHERE room_id = $1::UUID)";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                read::room::InUse(row.is_some_and(|r| r.get::<_, bool>(0)))
            })
    }
}

impl<C> Database<Select<By<read::room::Stats, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::room::Stats;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::room::Stats, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT COUNT(*)::INT4 AS total, \
                   (COUNT(*) FILTER (WHERE is_available))::INT4 AS available \
            FROM rooms";
        let count = |row: &Row, column| {
            u32::try_from(row.get::<_, i32>(column)).unwrap_or_default()
        };
        self.query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.map(|r| read::room::Stats {
                    total: count(&r, "total"),
                    available: count(&r, "available"),
                })
                .unwrap_or_default()
            })
    }
}

impl<C> Database<Select<By<read::room::list::Page, read::room::list::Selector>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::room::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::room::list::Page, read::room::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::room::list::Selector {
            arguments,
            filter: read::room::list::Filter { is_available },
        } = by.into_inner();

        let limit = sql_limit(arguments.limit()).saturating_add(1);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![&limit];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });
        let availability_idx = is_available.as_ref().map(|a| {
            ps.push(a);
            ps.len()
        });

        let sql = format!(
            "SELECT id \
             FROM rooms \
             WHERE true \
                   {cursor} \
                   {availability_filtering} \
             ORDER BY id {order} \
             LIMIT $1::INT4",
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                let op = arguments.kind().operator();
                f(&format_args!("AND id {op} ${idx}::UUID"))
            }),
            availability_filtering =
                availability_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND is_available = ${idx}::BOOLEAN"))
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

        Ok(read::room::list::Page::new(&arguments, edges, has_more))
    }
}

impl<C> Database<Select<By<read::room::list::TotalCount, read::room::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::room::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::room::list::TotalCount, read::room::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::room::list::Filter { is_available } = by.into_inner();

        const SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM rooms \
            WHERE $1::BOOLEAN IS NULL \
               OR is_available = $1::BOOLEAN";
        self.query_opt(SQL, &[&is_available])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.map_or(0, |r| r.get::<_, i32>(0)).into())
    }
}

impl<C>
    Database<Select<By<Vec<Configuration>, read::room::configuration::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Configuration>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<Vec<Configuration>, read::room::configuration::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::room::configuration::Filter {
            room_id,
            person_count,
            is_available,
        } = by.into_inner();
        let person_count = person_count.map(|c| i16::from(c.get()));

        const SQL: &str = "\
            SELECT id, room_id, person_count, \
                   daily_cost, monthly_cost, currency, \
                   is_available, description, \
                   created_at, updated_at \
            FROM room_configurations \
            WHERE ($1::UUID IS NULL OR room_id = $1::UUID) \
              AND ($2::INT2 IS NULL OR person_count = $2::INT2) \
              AND ($3::BOOLEAN IS NULL OR is_available = $3::BOOLEAN) \
            ORDER BY room_id ASC, person_count ASC";
        Ok(self
            .query(SQL, &[&room_id, &person_count, &is_available])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(configuration_from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Configuration>, room::configuration::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Configuration>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Configuration>, room::configuration::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: room::configuration::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, room_id, person_count, \
                   daily_cost, monthly_cost, currency, \
                   is_available, description, \
                   created_at, updated_at \
            FROM room_configurations \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(configuration_from_row))
    }
}

impl<C> Database<Insert<Configuration>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Update<Configuration>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(conf): Insert<Configuration>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(conf)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Configuration>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(conf): Update<Configuration>,
    ) -> Result<Self::Ok, Self::Err> {
        let Configuration {
            id,
            room_id,
            person_count,
            daily_cost,
            monthly_cost,
            is_available,
            description,
            created_at,
            updated_at,
        } = conf;
        let person_count = i16::from(person_count.get());

        const SQL: &str = "\
            INSERT INTO room_configurations (\
                id, room_id, person_count, \
                daily_cost, monthly_cost, currency, \
                is_available, description, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::INT2, \
                $4::NUMERIC, $5::NUMERIC, $6::INT2, \
                $7::BOOLEAN, $8::VARCHAR, \
                $9::TIMESTAMPTZ, $10::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET room_id = EXCLUDED.room_id, \
                person_count = EXCLUDED.person_count, \
                daily_cost = EXCLUDED.daily_cost, \
                monthly_cost = EXCLUDED.monthly_cost, \
                currency = EXCLUDED.currency, \
                is_available = EXCLUDED.is_available, \
                description = EXCLUDED.description, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &room_id,
                &person_count,
                &daily_cost.amount,
                &monthly_cost.amount,
                &daily_cost.currency,
                &is_available,
                &description,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Configuration, room::configuration::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Configuration, room::configuration::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: room::configuration::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM room_configurations \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

/// Reads a [`Room`] from the provided [`Row`].
fn room_from_row(row: &Row) -> Room {
    Room {
        id: row.get("id"),
        number: row.get("number"),
        bathroom: row.get("bathroom"),
        is_available: row.get("is_available"),
        description: row.get("description"),
        daily_cost: money(row, "daily_cost"),
        monthly_cost: money(row, "monthly_cost"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Reads a [`Configuration`] from the provided [`Row`].
fn configuration_from_row(row: &Row) -> Configuration {
    let currency = row.get("currency");
    Configuration {
        id: row.get("id"),
        room_id: row.get("room_id"),
        person_count: PersonCount::new(row.get::<_, i16>("person_count"))
            .expect("`person_count` out of range"),
        daily_cost: Money {
            amount: row.get("daily_cost"),
            currency,
        },
        monthly_cost: Money {
            amount: row.get("monthly_cost"),
            currency,
        },
        is_available: row.get("is_available"),
        description: row.get("description"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
