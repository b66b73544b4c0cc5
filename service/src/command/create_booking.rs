//! [`Command`] for creating a new [`Booking`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        availability,
        booking::{self, DurationType, PaymentStatus, Stay},
        cost::{self, Charges, Rates},
        customer,
        room::{self, configuration::PersonCount, Configuration},
        text::Remarks,
        Booking, Customer, Room,
    },
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for creating a new [`Booking`].
#[derive(Clone, Debug)]
pub struct CreateBooking {
    /// [`customer::Phone`] of the [`Customer`] to book for.
    pub customer_phone: customer::Phone,

    /// ID of the [`Room`] to book.
    pub room_id: room::Id,

    /// Number of people going to stay.
    pub number_of_people: PersonCount,

    /// Check-in [`DateTime`].
    pub check_in: booking::stay::CheckInDateTime,

    /// Check-out [`DateTime`].
    pub check_out: booking::stay::CheckOutDateTime,

    /// [`DurationType`] to bill the new [`Booking`] by.
    pub duration: DurationType,

    /// [`Rates`] overriding the ones of the [`Room`].
    pub rates: Option<Rates>,

    /// Flat surcharge for an early check-in.
    pub early_check_in_cost: Option<Money>,

    /// Flat surcharge for a late check-out.
    pub late_check_out_cost: Option<Money>,

    /// Initial [`booking::Status`], [`booking::Status::Confirmed`] by default.
    pub status: Option<booking::Status>,

    /// Initial [`PaymentStatus`], [`PaymentStatus::Pending`] by default.
    pub payment_status: Option<PaymentStatus>,

    /// [`Remarks`] about the new [`Booking`].
    pub remarks: Option<Remarks>,
}

impl<Db> Command<CreateBooking> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Room, room::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Room>, room::Id>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + for<'p> Database<
            Select<By<Option<Customer>, &'p customer::Phone>>,
            Ok = Option<Customer>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Configuration>, read::room::configuration::Filter>>,
            Ok = Vec<Configuration>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Booking>, read::booking::Occupying>>,
            Ok = Vec<Booking>,
            Err = Traced<database::Error>,
        > + Database<Insert<Booking>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateBooking {
            customer_phone,
            room_id,
            number_of_people,
            check_in,
            check_out,
            duration,
            rates,
            early_check_in_cost,
            late_check_out_cost,
            status,
            payment_status,
            remarks,
        } = cmd;

        let stay = Stay::new(check_in, check_out)
            .map_err(|_| E::InvalidInterval)
            .map_err(tracerr::wrap!())?;
        let given_costs = rates
            .iter()
            .flat_map(|r| [r.daily_cost, r.monthly_cost])
            .chain([early_check_in_cost, late_check_out_cost])
            .flatten()
            .collect::<Vec<_>>();
        if !self.accepts(&given_costs) {
            return Err(tracerr::new!(E::CurrencyMismatch));
        }
        if !cost::non_negative(given_costs.iter()) {
            return Err(tracerr::new!(E::NegativeCost));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Serialize all the bookings of the same `Room`.
        tx.execute(Lock(By::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let room = tx
            .execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())?;
        let customer = tx
            .execute(Select(By::<Option<Customer>, _>::new(&customer_phone)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if customer.is_none() {
            return Err(tracerr::new!(E::CustomerNotExists(customer_phone)));
        }

        let rates = if let Some(rates) = rates {
            rates
        } else {
            let configurations = tx
                .execute(Select(By::<Vec<Configuration>, _>::new(
                    read::room::configuration::Filter::room(room_id),
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            Rates::resolve(&room, &configurations, number_of_people)
                .map_err(|e| E::pricing(e, room_id, number_of_people))
                .map_err(tracerr::wrap!())?
        };
        let charges =
            Charges::new(rates, early_check_in_cost, late_check_out_cost);
        let total_amount = charges
            .total(duration, &stay)
            .map_err(|e| E::pricing(e, room_id, number_of_people))
            .map_err(tracerr::wrap!())?;

        let status = status.unwrap_or(booking::Status::Confirmed);
        if status.is_occupying() {
            let occupying = tx
                .execute(Select(By::<Vec<Booking>, _>::new(
                    read::booking::Occupying {
                        room_id: Some(room_id),
                        during: Some(stay),
                    },
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if availability::conflict(room_id, &stay, None, &occupying)
                .is_some()
            {
                return Err(tracerr::new!(E::RoomUnavailable(room_id)));
            }
        }

        let now = DateTime::now();
        let booking = Booking {
            id: booking::Id::new(),
            customer_phone,
            room_id,
            number_of_people,
            stay,
            duration,
            status,
            payment_status: payment_status.unwrap_or(PaymentStatus::Pending),
            charges,
            total_amount,
            remarks,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        tx.execute(Insert(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(booking)
    }
}

/// Error of [`CreateBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Check-out doesn't go after check-in.
    #[display("Check-out must go strictly after check-in")]
    #[from(ignore)]
    InvalidInterval,

    /// [`Room`] doesn't exist.
    #[display("`Room(id: {_0})` does not exist")]
    #[from(ignore)]
    RoomNotExists(#[error(not(source))] room::Id),

    /// [`Customer`] doesn't exist.
    #[display("`Customer(phone: {_0})` does not exist")]
    #[from(ignore)]
    CustomerNotExists(#[error(not(source))] customer::Phone),

    /// [`Room`] has no cost configured for the requested number of people.
    #[display(
        "`Room(id: {room_id})` has no cost for {person_count} people"
    )]
    #[from(ignore)]
    MissingConfiguration {
        /// ID of the [`Room`].
        room_id: room::Id,

        /// Requested number of people.
        person_count: PersonCount,
    },

    /// [`Room`] is occupied by another [`Booking`] for the requested period.
    #[display("`Room(id: {_0})` is unavailable for the requested period")]
    #[from(ignore)]
    RoomUnavailable(#[error(not(source))] room::Id),

    /// Cost is given in a currency other than the property one.
    #[display("Cost currency differs from the property one")]
    #[from(ignore)]
    CurrencyMismatch,

    /// Cost is negative.
    #[display("Cost must not be negative")]
    #[from(ignore)]
    NegativeCost,
}

impl ExecutionError {
    /// Converts the provided pricing [`cost::Error`] into an
    /// [`ExecutionError`].
    fn pricing(
        e: cost::Error,
        room_id: room::Id,
        person_count: PersonCount,
    ) -> Self {
        match e {
            cost::Error::MissingConfiguration | cost::Error::MissingRate(_) => {
                Self::MissingConfiguration {
                    room_id,
                    person_count,
                }
            }
            cost::Error::CurrencyMismatch => Self::CurrencyMismatch,
        }
    }
}
