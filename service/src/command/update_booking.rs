//! [`Command`] for updating a [`Booking`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        availability,
        booking::{self, DurationType, PaymentStatus, Stay},
        cost::{self, Rates},
        customer,
        room::{self, configuration::PersonCount, Configuration},
        text::Remarks,
        Booking, Customer, Room,
    },
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for updating a [`Booking`].
///
/// [`None`] fields are left untouched. The total amount is recomputed out of
/// the resulting cost components on every update.
#[derive(Clone, Debug, Default)]
pub struct UpdateBooking {
    /// ID of the [`Booking`] to update.
    pub booking_id: booking::Id,

    /// New [`customer::Phone`] of the [`Customer`] to book for.
    pub customer_phone: Option<customer::Phone>,

    /// ID of the new [`Room`] to book.
    pub room_id: Option<room::Id>,

    /// New number of people going to stay.
    pub number_of_people: Option<PersonCount>,

    /// New check-in [`DateTime`].
    pub check_in: Option<booking::stay::CheckInDateTime>,

    /// New check-out [`DateTime`].
    pub check_out: Option<booking::stay::CheckOutDateTime>,

    /// New [`DurationType`] to bill the [`Booking`] by.
    pub duration: Option<DurationType>,

    /// New [`Rates`] of the [`Booking`].
    ///
    /// If [`None`] while the [`Room`] or the number of people changes, the
    /// [`Rates`] are resolved anew.
    pub rates: Option<Rates>,

    /// New early check-in surcharge, or its removal.
    pub early_check_in_cost: Option<Option<Money>>,

    /// New late check-out surcharge, or its removal.
    pub late_check_out_cost: Option<Option<Money>>,

    /// New [`booking::Status`] of the [`Booking`].
    pub status: Option<booking::Status>,

    /// New [`PaymentStatus`] of the [`Booking`].
    pub payment_status: Option<PaymentStatus>,

    /// New [`Remarks`] about the [`Booking`], or their removal.
    pub remarks: Option<Option<Remarks>>,
}

impl<Db> Command<UpdateBooking> for Service<Db>
where
    Db: Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Room, room::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
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
        > + Database<Update<Booking>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    #[expect(clippy::too_many_lines, reason = "still readable")]
    async fn execute(
        &self,
        cmd: UpdateBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateBooking {
            booking_id,
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

        let given_costs = rates
            .iter()
            .flat_map(|r| [r.daily_cost, r.monthly_cost])
            .chain(early_check_in_cost)
            .chain(late_check_out_cost)
            .flatten()
            .collect::<Vec<_>>();
        if !self.accepts(&given_costs) {
            return Err(tracerr::new!(E::CurrencyMismatch));
        }
        if !cost::non_negative(given_costs.iter()) {
            return Err(tracerr::new!(E::NegativeCost));
        }

        let current_room_id = self
            .database()
            .execute(Select(By::<Option<Booking>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BookingNotExists(booking_id))
            .map_err(tracerr::wrap!())?
            .room_id;
        let mut locked = room_id.unwrap_or(current_room_id);

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Serialize all the bookings of the same `Room`.
        tx.execute(Lock(By::new(locked)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut booking = tx
            .execute(Select(By::<Option<Booking>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BookingNotExists(booking_id))
            .map_err(tracerr::wrap!())?;
        if room_id.is_none() && booking.room_id != locked {
            // The `Booking` was moved concurrently.
            locked = booking.room_id;
            tx.execute(Lock(By::new(locked)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
        }

        if let Some(next) = status {
            if !booking.status.can_become(next) {
                return Err(tracerr::new!(E::InvalidTransition {
                    from: booking.status,
                    to: next,
                }));
            }
        }

        let room = tx
            .execute(Select(By::<Option<Room>, _>::new(locked)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(locked))
            .map_err(tracerr::wrap!())?;
        if let Some(phone) = customer_phone {
            let customer = tx
                .execute(Select(By::<Option<Customer>, _>::new(&phone)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if customer.is_none() {
                return Err(tracerr::new!(E::CustomerNotExists(phone)));
            }
            booking.customer_phone = phone;
        }

        let stay = Stay::new(
            check_in.unwrap_or_else(|| booking.stay.check_in()),
            check_out.unwrap_or_else(|| booking.stay.check_out()),
        )
        .map_err(|_| E::InvalidInterval)
        .map_err(tracerr::wrap!())?;
        let people = number_of_people.unwrap_or(booking.number_of_people);

        let moved = room.id != booking.room_id
            || stay != booking.stay
            || status.is_some_and(|s| s != booking.status);
        let repriced = room.id != booking.room_id
            || people != booking.number_of_people;

        let rates = match rates {
            Some(rates) => Some(rates),
            None if repriced => {
                let configurations = tx
                    .execute(Select(By::<Vec<Configuration>, _>::new(
                        read::room::configuration::Filter::room(room.id),
                    )))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                let rates = Rates::resolve(&room, &configurations, people)
                    .map_err(|e| E::pricing(e, room.id, people))
                    .map_err(tracerr::wrap!())?;
                Some(rates)
            }
            None => None,
        };
        if let Some(rates) = rates {
            booking.charges.daily_cost = rates.daily_cost;
            booking.charges.monthly_cost = rates.monthly_cost;
        }
        if let Some(cost) = early_check_in_cost {
            booking.charges.early_check_in_cost = cost;
        }
        if let Some(cost) = late_check_out_cost {
            booking.charges.late_check_out_cost = cost;
        }

        booking.room_id = room.id;
        booking.number_of_people = people;
        booking.stay = stay;
        if let Some(duration) = duration {
            booking.duration = duration;
        }
        if let Some(status) = status {
            booking.status = status;
        }
        if let Some(payment_status) = payment_status {
            booking.payment_status = payment_status;
        }
        if let Some(remarks) = remarks {
            booking.remarks = remarks;
        }
        booking.total_amount = booking
            .charges
            .total(booking.duration, &booking.stay)
            .map_err(|e| E::pricing(e, room.id, people))
            .map_err(tracerr::wrap!())?;

        if moved && booking.is_occupying() {
            let occupying = tx
                .execute(Select(By::<Vec<Booking>, _>::new(
                    read::booking::Occupying {
                        room_id: Some(room.id),
                        during: Some(stay),
                    },
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            let conflict = availability::conflict(
                room.id,
                &stay,
                Some(booking.id),
                &occupying,
            );
            if conflict.is_some() {
                return Err(tracerr::new!(E::RoomUnavailable(room.id)));
            }
        }

        booking.updated_at = DateTime::now().coerce();

        tx.execute(Update(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(booking)
    }
}

/// Error of [`UpdateBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Booking`] doesn't exist.
    #[display("`Booking(id: {_0})` does not exist")]
    #[from(ignore)]
    BookingNotExists(#[error(not(source))] booking::Id),

    /// [`Room`] doesn't exist.
    #[display("`Room(id: {_0})` does not exist")]
    #[from(ignore)]
    RoomNotExists(#[error(not(source))] room::Id),

    /// [`Customer`] doesn't exist.
    #[display("`Customer(phone: {_0})` does not exist")]
    #[from(ignore)]
    CustomerNotExists(#[error(not(source))] customer::Phone),

    /// Check-out doesn't go after check-in.
    #[display("Check-out must go strictly after check-in")]
    #[from(ignore)]
    InvalidInterval,

    /// [`Booking`] cannot move into the requested [`booking::Status`].
    #[display("`Booking` cannot move from `{from}` to `{to}`")]
    #[from(ignore)]
    InvalidTransition {
        /// Current [`booking::Status`].
        from: booking::Status,

        /// Requested [`booking::Status`].
        to: booking::Status,
    },

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
