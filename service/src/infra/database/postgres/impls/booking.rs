//! [`Booking`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Lock, Select, Update},
    Date, Money,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use rust_decimal::Decimal;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        booking::{self, request, PaymentStatus, Request, Stay},
        cost::Charges,
        room::configuration::PersonCount,
        Booking,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

use super::{money, sql_limit};

/// Columns of a [`Booking`] in the `bookings` table.
const BOOKING_COLUMNS: &str = "\
    id, customer_phone, room_id, number_of_people, \
    check_in, check_out, duration, \
    status, payment_status, \
    daily_cost, monthly_cost, early_check_in_cost, late_check_out_cost, \
    total_amount, currency, \
    remarks, \
    created_at, updated_at";

impl<C> Database<Select<By<Option<Booking>, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Booking>, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: booking::Id = by.into_inner();

        let sql = format!(
            "SELECT {BOOKING_COLUMNS} \
             FROM bookings \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(booking_from_row))
    }
}

impl<C> Database<Select<By<Vec<Booking>, read::booking::Occupying>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Booking>, read::booking::Occupying>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::booking::Occupying { room_id, during } = by.into_inner();
        let statuses = booking::Status::ALL
            .iter()
            .copied()
            .filter(|s| s.is_occupying())
            .collect::<Vec<_>>();
        let from = during.map(|s| s.check_in());
        let till = during.map(|s| s.check_out());

        let sql = format!(
            "SELECT {BOOKING_COLUMNS} \
             FROM bookings \
             WHERE status = ANY($1::INT2[]) \
               AND ($2::UUID IS NULL OR room_id = $2::UUID) \
               AND ($3::TIMESTAMPTZ IS NULL OR check_out > $3::TIMESTAMPTZ) \
               AND ($4::TIMESTAMPTZ IS NULL OR check_in < $4::TIMESTAMPTZ) \
             ORDER BY check_in ASC",
        );
        Ok(self
            .query(&sql, &[&statuses, &room_id, &from, &till])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(booking_from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Booking>, read::booking::Touching>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Booking>, read::booking::Touching>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::booking::Touching(date) = by.into_inner();

        let sql = format!(
            "SELECT {BOOKING_COLUMNS} \
             FROM bookings \
             WHERE (check_in AT TIME ZONE 'UTC')::DATE = $1::DATE \
                OR (check_out AT TIME ZONE 'UTC')::DATE = $1::DATE \
             ORDER BY check_in ASC",
        );
        Ok(self
            .query(&sql, &[&date])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(booking_from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Booking>, read::booking::Outstanding>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<Booking>, read::booking::Outstanding>>,
    ) -> Result<Self::Ok, Self::Err> {
        let sql = format!(
            "SELECT {BOOKING_COLUMNS} \
             FROM bookings \
             WHERE payment_status = $1::INT2 \
                OR total_amount > COALESCE((SELECT SUM(amount) \
                                            FROM payments \
                                            WHERE booking_id = bookings.id), \
                                           0) \
             ORDER BY check_in ASC",
        );
        Ok(self
            .query(&sql, &[&PaymentStatus::Pending])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(booking_from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<Booking>, read::booking::Recent>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Booking>, read::booking::Recent>>,
    ) -> Result<Self::Ok, Self::Err> {
        let limit = i32::from(*by.into_inner());

        let sql = format!(
            "SELECT {BOOKING_COLUMNS} \
             FROM bookings \
             ORDER BY created_at DESC \
             LIMIT $1::INT4",
        );
        Ok(self
            .query(&sql, &[&limit])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(booking_from_row)
            .collect())
    }
}

impl<C> Database<Select<By<read::booking::Revenue, Option<Date>>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::booking::Revenue;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::booking::Revenue, Option<Date>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let date = by.into_inner();

        const SQL: &str = "\
            SELECT COALESCE(SUM(total_amount), 0) \
            FROM bookings \
            WHERE $1::DATE IS NULL \
               OR (check_in AT TIME ZONE 'UTC')::DATE = $1::DATE";
        self.query_opt(SQL, &[&date])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.map_or(Decimal::ZERO, |r| r.get::<_, Decimal>(0)).into()
            })
    }
}

impl<C> Database<Insert<Booking>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Booking>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(booking): Insert<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(booking))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Booking>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(booking): Update<Booking>,
    ) -> Result<Self::Ok, Self::Err> {
        let Booking {
            id,
            customer_phone,
            room_id,
            number_of_people,
            stay,
            duration,
            status,
            payment_status,
            charges,
            total_amount,
            remarks,
            created_at,
            updated_at,
        } = booking;
        let number_of_people = i16::from(number_of_people.get());
        let (check_in, check_out) = (stay.check_in(), stay.check_out());
        let [daily, monthly, early, late] = charge_amounts(&charges);

        const SQL: &str = "\
            INSERT INTO bookings (\
                id, customer_phone, room_id, number_of_people, \
                check_in, check_out, duration, \
                status, payment_status, \
                daily_cost, monthly_cost, \
                early_check_in_cost, late_check_out_cost, \
                total_amount, currency, \
                remarks, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::UUID, $4::INT2, \
                $5::TIMESTAMPTZ, $6::TIMESTAMPTZ, $7::INT2, \
                $8::INT2, $9::INT2, \
                $10::NUMERIC, $11::NUMERIC, \
                $12::NUMERIC, $13::NUMERIC, \
                $14::NUMERIC, $15::INT2, \
                $16::VARCHAR, \
                $17::TIMESTAMPTZ, $18::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET customer_phone = EXCLUDED.customer_phone, \
                room_id = EXCLUDED.room_id, \
                number_of_people = EXCLUDED.number_of_people, \
                check_in = EXCLUDED.check_in, \
                check_out = EXCLUDED.check_out, \
                duration = EXCLUDED.duration, \
                status = EXCLUDED.status, \
                payment_status = EXCLUDED.payment_status, \
                daily_cost = EXCLUDED.daily_cost, \
                monthly_cost = EXCLUDED.monthly_cost, \
                early_check_in_cost = EXCLUDED.early_check_in_cost, \
                late_check_out_cost = EXCLUDED.late_check_out_cost, \
                total_amount = EXCLUDED.total_amount, \
                currency = EXCLUDED.currency, \
                remarks = EXCLUDED.remarks, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &customer_phone,
                &room_id,
                &number_of_people,
                &check_in,
                &check_out,
                &duration,
                &status,
                &payment_status,
                &daily,
                &monthly,
                &early,
                &late,
                &total_amount.amount,
                &total_amount.currency,
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

impl<C> Database<Delete<By<Booking, booking::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Booking, booking::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: booking::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM bookings \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<
        Select<By<read::booking::list::Page, read::booking::list::Selector>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::booking::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::booking::list::Page, read::booking::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::booking::list::Selector { arguments, filter } =
            by.into_inner();

        let limit = sql_limit(arguments.limit()).saturating_add(1);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![
            &limit,
            &filter.room_id,
            &filter.customer_phone,
            &filter.status,
            &filter.payment_status,
            &filter.check_in_from,
            &filter.check_in_to,
        ];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });

        let sql = format!(
            "SELECT id \
             FROM bookings \
             WHERE {filtering} \
                   {cursor} \
             ORDER BY id {order} \
             LIMIT $1::INT4",
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                let op = arguments.kind().operator();
                f(&format_args!("AND id {op} ${idx}::UUID"))
            }),
            filtering = booking_filter(2),
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

        Ok(read::booking::list::Page::new(&arguments, edges, has_more))
    }
}

impl<C>
    Database<
        Select<By<read::booking::list::TotalCount, read::booking::list::Filter>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::booking::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::booking::list::TotalCount, read::booking::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();

        let sql = format!(
            "SELECT COUNT(*)::INT4 \
             FROM bookings \
             WHERE {filtering}",
            filtering = booking_filter(1),
        );
        self.query_opt(
            &sql,
            &[
                &filter.room_id,
                &filter.customer_phone,
                &filter.status,
                &filter.payment_status,
                &filter.check_in_from,
                &filter.check_in_to,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|row| row.map_or(0, |r| r.get::<_, i32>(0)).into())
    }
}

/// Builds SQL condition of a [`read::booking::list::Filter`] taking its fields
/// as six parameters starting from the `first` one.
fn booking_filter(first: usize) -> String {
    let [room, phone, status, payment, from, to] =
        [0, 1, 2, 3, 4, 5].map(|i| first + i);
    format!(
        "(${room}::UUID IS NULL OR room_id = ${room}::UUID) \
         AND (${phone}::VARCHAR IS NULL \
              OR customer_phone = ${phone}::VARCHAR) \
         AND (${status}::INT2 IS NULL OR status = ${status}::INT2) \
         AND (${payment}::INT2 IS NULL \
              OR payment_status = ${payment}::INT2) \
         AND (${from}::DATE IS NULL \
              OR (check_in AT TIME ZONE 'UTC')::DATE >= ${from}::DATE) \
         AND (${to}::DATE IS NULL \
              OR (check_in AT TIME ZONE 'UTC')::DATE <= ${to}::DATE)",
    )
}

impl<C> Database<Select<By<Option<Request>, request::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Request>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Request>, request::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: request::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, customer_name, customer_phone, \
                   room_id, number_of_people, \
                   check_in, check_out, duration, \
                   daily_cost, monthly_cost, \
                   early_check_in_cost, late_check_out_cost, \
                   total_amount, currency, \
                   status, remarks, rejection_reason, booking_id, \
                   created_at, updated_at \
            FROM booking_requests \
            WHERE id = $1::UUID \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Request {
                id: row.get("id"),
                customer_name: row.get("customer_name"),
                customer_phone: row.get("customer_phone"),
                room_id: row.get("room_id"),
                number_of_people: number_of_people(&row),
                stay: stay(&row),
                duration: row.get("duration"),
                charges: charges(&row),
                total_amount: total_amount(&row),
                status: row.get("status"),
                remarks: row.get("remarks"),
                rejection_reason: row.get("rejection_reason"),
                booking_id: row.get("booking_id"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            }))
    }
}

impl<C> Database<Insert<Request>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Request>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(request): Insert<Request>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(request))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Request>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(request): Update<Request>,
    ) -> Result<Self::Ok, Self::Err> {
        let Request {
            id,
            customer_name,
            customer_phone,
            room_id,
            number_of_people,
            stay,
            duration,
            charges,
            total_amount,
            status,
            remarks,
            rejection_reason,
            booking_id,
            created_at,
            updated_at,
        } = request;
        let number_of_people = i16::from(number_of_people.get());
        let (check_in, check_out) = (stay.check_in(), stay.check_out());
        let [daily, monthly, early, late] = charge_amounts(&charges);

        const SQL: &str = "\
            INSERT INTO booking_requests (\
                id, customer_name, customer_phone, \
                room_id, number_of_people, \
                check_in, check_out, duration, \
                daily_cost, monthly_cost, \
                early_check_in_cost, late_check_out_cost, \
                total_amount, currency, \
                status, remarks, rejection_reason, booking_id, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, \
                $4::UUID, $5::INT2, \
                $6::TIMESTAMPTZ, $7::TIMESTAMPTZ, $8::INT2, \
                $9::NUMERIC, $10::NUMERIC, \
                $11::NUMERIC, $12::NUMERIC, \
                $13::NUMERIC, $14::INT2, \
                $15::INT2, $16::VARCHAR, $17::VARCHAR, $18::UUID, \
                $19::TIMESTAMPTZ, $20::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET customer_name = EXCLUDED.customer_name, \
                customer_phone = EXCLUDED.customer_phone, \
                room_id = EXCLUDED.room_id, \
                number_of_people = EXCLUDED.number_of_people, \
                check_in = EXCLUDED.check_in, \
                check_out = EXCLUDED.check_out, \
                duration = EXCLUDED.duration, \
                daily_cost = EXCLUDED.daily_cost, \
                monthly_cost = EXCLUDED.monthly_cost, \
                early_check_in_cost = EXCLUDED.early_check_in_cost, \
                late_check_out_cost = EXCLUDED.late_check_out_cost, \
                total_amount = EXCLUDED.total_amount, \
                currency = EXCLUDED.currency, \
                status = EXCLUDED.status, \
                remarks = EXCLUDED.remarks, \
                rejection_reason = EXCLUDED.rejection_reason, \
                booking_id = EXCLUDED.booking_id, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &customer_name,
                &customer_phone,
                &room_id,
                &number_of_people,
                &check_in,
                &check_out,
                &duration,
                &daily,
                &monthly,
                &early,
                &late,
                &total_amount.amount,
                &total_amount.currency,
                &status,
                &remarks,
                &rejection_reason,
                &booking_id,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Request, request::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Request, request::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: request::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM booking_requests \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Request, request::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Request, request::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: request::Id = by.into_inner();

        // Updating the existing row holds its lock till the end of the
        // transaction.
        const SQL: &str = "\
            INSERT INTO booking_requests_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO UPDATE \
            SET id = EXCLUDED.id";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C>
    Database<
        Select<
            By<
                read::booking::request::list::Page,
                read::booking::request::list::Selector,
            >,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::booking::request::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                read::booking::request::list::Page,
                read::booking::request::list::Selector,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::booking::request::list::Selector { arguments, filter } =
            by.into_inner();

        let limit = sql_limit(arguments.limit()).saturating_add(1);

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![
            &limit,
            &filter.status,
            &filter.room_id,
            &filter.customer_phone,
        ];

        let cursor_idx = arguments.cursor().map(|c| {
            ps.push(c);
            ps.len()
        });

        let sql = format!(
            "SELECT id \
             FROM booking_requests \
             WHERE {filtering} \
                   {cursor} \
             ORDER BY id {order} \
             LIMIT $1::INT4",
            cursor = cursor_idx.into_iter().format_with("", |idx, f| {
                let op = arguments.kind().operator();
                f(&format_args!("AND id {op} ${idx}::UUID"))
            }),
            filtering = request_filter(2),
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

        Ok(read::booking::request::list::Page::new(
            &arguments, edges, has_more,
        ))
    }
}

impl<C>
    Database<
        Select<
            By<
                read::booking::request::list::TotalCount,
                read::booking::request::list::Filter,
            >,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::booking::request::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<
                read::booking::request::list::TotalCount,
                read::booking::request::list::Filter,
            >,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let filter = by.into_inner();

        let sql = format!(
            "SELECT COUNT(*)::INT4 \
             FROM booking_requests \
             WHERE {filtering}",
            filtering = request_filter(1),
        );
        self.query_opt(
            &sql,
            &[
                &filter.status,
                &filter.room_id,
                &filter.customer_phone,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(|row| row.map_or(0, |r| r.get::<_, i32>(0)).into())
    }
}

/// Builds SQL condition of a [`read::booking::request::list::Filter`] taking
/// its fields as three parameters starting from the `first` one.
fn request_filter(first: usize) -> String {
    let [status, room, phone] = [0, 1, 2].map(|i| first + i);
    format!(
        "(${status}::INT2 IS NULL OR status = ${status}::INT2) \
         AND (${room}::UUID IS NULL OR room_id = ${room}::UUID) \
         AND (${phone}::VARCHAR IS NULL \
              OR customer_phone = ${phone}::VARCHAR)",
    )
}

/// Reads a [`Booking`] from the provided [`Row`].
fn booking_from_row(row: &Row) -> Booking {
    Booking {
        id: row.get("id"),
        customer_phone: row.get("customer_phone"),
        room_id: row.get("room_id"),
        number_of_people: number_of_people(row),
        stay: stay(row),
        duration: row.get("duration"),
        status: row.get("status"),
        payment_status: row.get("payment_status"),
        charges: charges(row),
        total_amount: total_amount(row),
        remarks: row.get("remarks"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Reads the `number_of_people` column of the provided [`Row`].
fn number_of_people(row: &Row) -> PersonCount {
    PersonCount::new(row.get::<_, i16>("number_of_people"))
        .expect("`number_of_people` out of range")
}

/// Reads the `check_in` and `check_out` columns of the provided [`Row`].
fn stay(row: &Row) -> Stay {
    Stay::new(row.get("check_in"), row.get("check_out"))
        .expect("`check_out` goes after `check_in`")
}

/// Reads the cost columns of the provided [`Row`].
fn charges(row: &Row) -> Charges {
    Charges {
        daily_cost: money(row, "daily_cost"),
        monthly_cost: money(row, "monthly_cost"),
        early_check_in_cost: money(row, "early_check_in_cost"),
        late_check_out_cost: money(row, "late_check_out_cost"),
    }
}

/// Reads the `total_amount` column of the provided [`Row`].
fn total_amount(row: &Row) -> Money {
    Money {
        amount: row.get("total_amount"),
        currency: row.get("currency"),
    }
}

/// Splits the provided [`Charges`] into their bare amounts.
fn charge_amounts(charges: &Charges) -> [Option<Decimal>; 4] {
    [
        charges.daily_cost,
        charges.monthly_cost,
        charges.early_check_in_cost,
        charges.late_check_out_cost,
    ]
    .map(|m| m.map(|m| m.amount))
}
