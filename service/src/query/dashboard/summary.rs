//! [`TodaySummary`] definition.

use std::collections::HashMap;

use common::{
    money::Currency,
    operations::{By, Select},
    Date, Money, Percent,
};
use tracerr::Traced;

use crate::{
    domain::{booking, customer, payment, room, Booking, Customer, Payment, Room},
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] summarizing the property state on a [`Date`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TodaySummary {
    /// [`Date`] to summarize.
    pub date: Date,
}

/// Output of the [`TodaySummary`] [`Query`].
#[derive(Clone, Debug)]
pub struct Summary {
    /// Summarized [`Date`].
    pub date: Date,

    /// Total number of [`Customer`]s.
    pub total_customers: u32,

    /// Numbers of [`Room`]s.
    pub rooms: read::room::Stats,

    /// Share of [`Room`]s not flagged as available.
    pub occupancy_rate: Percent,

    /// Number of [`Booking`]s checking in or out on the [`Date`].
    pub todays_bookings: u32,

    /// Confirmed [`Booking`]s checking in on the [`Date`].
    pub check_ins: Vec<Row>,

    /// Checked-in [`Booking`]s checking out on the [`Date`].
    pub check_outs: Vec<Row>,

    /// [`Booking`]s having something left to pay.
    pub pending_dues: Vec<Due>,

    /// Total amount of the [`Booking`]s checking in on the [`Date`].
    pub revenue: Money,

    /// Total amount of all the [`Booking`]s ever made.
    pub total_revenue: Money,
}

/// [`Booking`] row of a [`Summary`].
#[derive(Clone, Debug)]
pub struct Row {
    /// Summarized [`Booking`].
    pub booking: Booking,

    /// Name of the [`Customer`], or a placeholder if there is none.
    pub customer_name: String,

    /// Number of the [`Room`], or a placeholder if there is none.
    pub room_number: String,
}

/// [`Booking`] with something left to pay.
#[derive(Clone, Debug)]
pub struct Due {
    /// Summarized [`Booking`] with its names.
    pub row: Row,

    /// Paid and due amounts of the [`Booking`].
    pub reconciliation: payment::Reconciliation,
}

/// Everything a [`Summary`] is aggregated from.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Summarized [`Date`].
    pub date: Date,

    /// Total number of [`Customer`]s.
    pub total_customers: u32,

    /// Numbers of [`Room`]s.
    pub rooms: read::room::Stats,

    /// [`Booking`]s checking in or out on the [`Date`].
    pub touching: Vec<Booking>,

    /// [`Booking`]s possibly having something left to pay.
    pub outstanding: Vec<Booking>,

    /// [`Payment`]s of the `outstanding` [`Booking`]s.
    pub payments: Vec<Payment>,

    /// [`Customer`]s of the [`Booking`]s.
    pub customers: HashMap<customer::Phone, Customer>,

    /// [`Room`]s of the [`Booking`]s.
    pub room_index: HashMap<room::Id, Room>,

    /// Total amount of the [`Booking`]s checking in on the [`Date`].
    pub revenue: Money,

    /// Total amount of all the [`Booking`]s.
    pub total_revenue: Money,
}

impl Snapshot {
    /// Aggregates this [`Snapshot`] into a [`Summary`].
    #[must_use]
    pub fn summarize(self) -> Summary {
        let Self {
            date,
            total_customers,
            rooms,
            touching,
            outstanding,
            payments,
            customers,
            room_index,
            revenue,
            total_revenue,
        } = self;

        let row = |booking: Booking| Row {
            customer_name: customers
                .get(&booking.customer_phone)
                .map_or_else(|| "Unknown Customer".into(), |c| c.name.to_string()),
            room_number: room_index.get(&booking.room_id).map_or_else(
                || format!("Room {}", booking.room_id),
                |r| r.number.to_string(),
            ),
            booking,
        };

        let todays_bookings =
            u32::try_from(touching.len()).unwrap_or(u32::MAX);
        let (mut check_ins, mut check_outs) = (vec![], vec![]);
        for b in touching {
            if b.status == booking::Status::Confirmed
                && b.stay.check_in().date() == date
            {
                check_ins.push(row(b));
            } else if b.status == booking::Status::CheckedIn
                && b.stay.check_out().date() == date
            {
                check_outs.push(row(b));
            }
        }

        let pending_dues = outstanding
            .into_iter()
            .filter_map(|b| {
                let reconciliation = payment::Reconciliation::new(&b, &payments);
                let pending = b.payment_status == booking::PaymentStatus::Pending;
                (pending || reconciliation.is_due()).then(|| Due {
                    row: row(b),
                    reconciliation,
                })
            })
            .collect();

        Summary {
            date,
            total_customers,
            occupancy_rate: Percent::ratio(
                rooms.occupied().into(),
                rooms.total.into(),
            ),
            rooms,
            todays_bookings,
            check_ins,
            check_outs,
            pending_dues,
            revenue,
            total_revenue,
        }
    }
}

impl<Db> Query<TodaySummary> for Service<Db>
where
    Db: Database<
            Select<
                By<read::customer::list::TotalCount, read::customer::list::Filter>,
            >,
            Ok = read::customer::list::TotalCount,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::room::Stats, ()>>,
            Ok = read::room::Stats,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Booking>, read::booking::Touching>>,
            Ok = Vec<Booking>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Booking>, read::booking::Outstanding>>,
            Ok = Vec<Booking>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Payment>, Vec<booking::Id>>>,
            Ok = Vec<Payment>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<customer::Phone, Customer>, Vec<customer::Phone>>>,
            Ok = HashMap<customer::Phone, Customer>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<room::Id, Room>, Vec<room::Id>>>,
            Ok = HashMap<room::Id, Room>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<read::booking::Revenue, Option<Date>>>,
            Ok = read::booking::Revenue,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Summary;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        TodaySummary { date }: TodaySummary,
    ) -> Result<Self::Ok, Self::Err> {
        let db = self.database();
        let currency = self.config().currency;

        let total_customers = db
            .execute(Select(By::<read::customer::list::TotalCount, _>::new(
                read::customer::list::Filter::default(),
            )))
            .await
            .map_err(tracerr::wrap!())?;
        let rooms = db
            .execute(Select(By::<read::room::Stats, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        let touching = db
            .execute(Select(By::<Vec<Booking>, _>::new(
                read::booking::Touching(date),
            )))
            .await
            .map_err(tracerr::wrap!())?;
        let outstanding = db
            .execute(Select(By::<Vec<Booking>, _>::new(
                read::booking::Outstanding,
            )))
            .await
            .map_err(tracerr::wrap!())?;

        let payments = db
            .execute(Select(By::<Vec<Payment>, _>::new(
                outstanding.iter().map(|b| b.id).collect::<Vec<_>>(),
            )))
            .await
            .map_err(tracerr::wrap!())?;
        let all = touching.iter().chain(&outstanding);
        let customers = db
            .execute(Select(By::<HashMap<customer::Phone, Customer>, _>::new(
                all.clone()
                    .map(|b| b.customer_phone.clone())
                    .collect::<Vec<_>>(),
            )))
            .await
            .map_err(tracerr::wrap!())?;
        let room_index = db
            .execute(Select(By::<HashMap<room::Id, Room>, _>::new(
                all.map(|b| b.room_id).collect::<Vec<_>>(),
            )))
            .await
            .map_err(tracerr::wrap!())?;

        let revenue = db
            .execute(Select(By::<read::booking::Revenue, _>::new(Some(date))))
            .await
            .map_err(tracerr::wrap!())?;
        let total_revenue = db
            .execute(Select(By::<read::booking::Revenue, _>::new(None)))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(Snapshot {
            date,
            total_customers: u32::try_from(i32::from(total_customers))
                .unwrap_or_default(),
            rooms,
            touching,
            outstanding,
            payments,
            customers,
            room_index,
            revenue: money(revenue, currency),
            total_revenue: money(total_revenue, currency),
        }
        .summarize())
    }
}

/// Converts the provided [`read::booking::Revenue`] into [`Money`].
fn money(revenue: read::booking::Revenue, currency: Currency) -> Money {
    Money {
        amount: revenue.into(),
        currency,
    }
}

#[cfg(test)]
mod spec {
    use std::collections::HashMap;

    use common::{money::Currency, Date, DateTime, Money};
    use rust_decimal::Decimal;

    use crate::{
        domain::{
            booking::{self, DurationType, PaymentStatus, Status, Stay},
            cost::Charges,
            customer,
            payment::{self, Payment},
            room::{self, configuration::PersonCount},
            Booking,
        },
        read,
    };

    use super::Snapshot;

    fn inr(amount: u32) -> Money {
        Money {
            amount: amount.into(),
            currency: Currency::Inr,
        }
    }

    fn booking(
        status: Status,
        payment_status: PaymentStatus,
        from: &str,
        to: &str,
        total: u32,
    ) -> Booking {
        Booking {
            id: booking::Id::new(),
            customer_phone: customer::Phone::new("9876543210").unwrap(),
            room_id: room::Id::new(),
            number_of_people: PersonCount::ONE,
            stay: Stay::new(
                DateTime::parse(from).unwrap().coerce(),
                DateTime::parse(to).unwrap().coerce(),
            )
            .unwrap(),
            duration: DurationType::Daily,
            status,
            payment_status,
            charges: Charges {
                daily_cost: Some(inr(total)),
                monthly_cost: None,
                early_check_in_cost: None,
                late_check_out_cost: None,
            },
            total_amount: inr(total),
            remarks: None,
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        }
    }

    fn payment(booking: &Booking, amount: u32) -> Payment {
        Payment {
            id: payment::Id::new(),
            booking_id: booking.id,
            amount: inr(amount),
            method: payment::Method::Cash,
            status: payment::Status::Completed,
            screenshot_url: None,
            transaction_id: None,
            paid_at: DateTime::now().coerce(),
            created_at: DateTime::now().coerce(),
        }
    }

    fn snapshot(date: Date) -> Snapshot {
        Snapshot {
            date,
            total_customers: 0,
            rooms: read::room::Stats::default(),
            touching: vec![],
            outstanding: vec![],
            payments: vec![],
            customers: HashMap::new(),
            room_index: HashMap::new(),
            revenue: inr(0),
            total_revenue: inr(0),
        }
    }

    #[test]
    fn splits_arrivals_and_departures() {
        let date = Date::from_calendar_date(2025, 1, 5).unwrap();
        let arriving = booking(
            Status::Confirmed,
            PaymentStatus::Paid,
            "2025-01-05T12:00:00",
            "2025-01-07T10:00:00",
            100,
        );
        let leaving = booking(
            Status::CheckedIn,
            PaymentStatus::Paid,
            "2025-01-01T12:00:00",
            "2025-01-05T10:00:00",
            100,
        );
        let cancelled = booking(
            Status::Cancelled,
            PaymentStatus::Paid,
            "2025-01-05T12:00:00",
            "2025-01-06T10:00:00",
            100,
        );

        let summary = Snapshot {
            touching: vec![arriving.clone(), leaving.clone(), cancelled],
            ..snapshot(date)
        }
        .summarize();

        assert_eq!(summary.todays_bookings, 3);
        assert_eq!(summary.check_ins.len(), 1);
        assert_eq!(summary.check_ins[0].booking.id, arriving.id);
        assert_eq!(summary.check_outs.len(), 1);
        assert_eq!(summary.check_outs[0].booking.id, leaving.id);
    }

    #[test]
    fn names_default_to_placeholders() {
        let date = Date::from_calendar_date(2025, 1, 5).unwrap();
        let arriving = booking(
            Status::Confirmed,
            PaymentStatus::Paid,
            "2025-01-05T12:00:00",
            "2025-01-07T10:00:00",
            100,
        );

        let summary = Snapshot {
            touching: vec![arriving.clone()],
            ..snapshot(date)
        }
        .summarize();

        assert_eq!(summary.check_ins[0].customer_name, "Unknown Customer");
        assert_eq!(
            summary.check_ins[0].room_number,
            format!("Room {}", arriving.room_id),
        );
    }

    #[test]
    fn lists_dues_with_reconciled_amounts() {
        let date = Date::from_calendar_date(2025, 1, 5).unwrap();
        let partial = booking(
            Status::Confirmed,
            PaymentStatus::Partial,
            "2025-01-01T12:00:00",
            "2025-01-03T10:00:00",
            1000,
        );
        let settled = booking(
            Status::Confirmed,
            PaymentStatus::Paid,
            "2025-01-01T12:00:00",
            "2025-01-03T10:00:00",
            500,
        );
        let payments = vec![
            payment(&partial, 400),
            payment(&partial, 300),
            payment(&settled, 500),
        ];

        let summary = Snapshot {
            outstanding: vec![partial.clone(), settled],
            payments,
            ..snapshot(date)
        }
        .summarize();

        assert_eq!(summary.pending_dues.len(), 1);
        let due = &summary.pending_dues[0];
        assert_eq!(due.row.booking.id, partial.id);
        assert_eq!(due.reconciliation.paid, inr(700));
        assert_eq!(due.reconciliation.due, inr(300));
    }

    #[test]
    fn pending_payment_status_is_listed_even_if_paid() {
        let date = Date::from_calendar_date(2025, 1, 5).unwrap();
        let pending = booking(
            Status::Confirmed,
            PaymentStatus::Pending,
            "2025-01-01T12:00:00",
            "2025-01-03T10:00:00",
            500,
        );

        let summary = Snapshot {
            payments: vec![payment(&pending, 500)],
            outstanding: vec![pending],
            ..snapshot(date)
        }
        .summarize();

        assert_eq!(summary.pending_dues.len(), 1);
        assert_eq!(summary.pending_dues[0].reconciliation.due, inr(0));
    }

    #[test]
    fn occupancy_rate_follows_room_flags() {
        let date = Date::from_calendar_date(2025, 1, 5).unwrap();

        let summary = Snapshot {
            rooms: read::room::Stats {
                total: 8,
                available: 6,
            },
            ..snapshot(date)
        }
        .summarize();
        assert_eq!(summary.occupancy_rate.value(), Decimal::from(25));
        assert_eq!(summary.rooms.occupied(), 2);

        let empty = snapshot(date).summarize();
        assert_eq!(empty.occupancy_rate.value(), Decimal::ZERO);
    }
}
