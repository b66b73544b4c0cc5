//! [`Command`] for creating a new booking [`Request`].

use common::{
    operations::{By, Insert, Select},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Customer;
use crate::{
    domain::{
        availability,
        booking::{self, request, DurationType, Request, Stay},
        cost::{self, Charges, Rates},
        customer,
        room::{self, configuration::PersonCount, Configuration},
        text::Remarks,
        Booking, Room,
    },
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for creating a new booking [`Request`].
///
/// The [`Request`] is priced by the [`Room`] rates and is accepted only if
/// the [`Room`] is free for the requested [`Stay`] at the moment.
#[derive(Clone, Debug)]
pub struct CreateBookingRequest {
    /// [`customer::Name`] of the requesting [`Customer`].
    pub customer_name: customer::Name,

    /// [`customer::Phone`] of the requesting [`Customer`].
    pub customer_phone: customer::Phone,

    /// ID of the requested [`Room`].
    pub room_id: room::Id,

    /// Number of people going to stay.
    pub number_of_people: PersonCount,

    /// Requested check-in [`DateTime`].
    pub check_in: booking::stay::CheckInDateTime,

    /// Requested check-out [`DateTime`].
    pub check_out: booking::stay::CheckOutDateTime,

    /// [`DurationType`] to bill the [`Booking`] by.
    pub duration: DurationType,

    /// Flat surcharge for an early check-in.
    pub early_check_in_cost: Option<Money>,

    /// Flat surcharge for a late check-out.
    pub late_check_out_cost: Option<Money>,

    /// [`Remarks`] about the new [`Request`].
    pub remarks: Option<Remarks>,
}

impl<Db> Command<CreateBookingRequest> for Service<Db>
where
    Db: Database<
            Select<By<Option<Room>, room::Id>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Configuration>, read::room::configuration::Filter>>,
            Ok = Vec<Configuration>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Booking>, read::booking::Occupying>>,
            Ok = Vec<Booking>,
            Err = Traced<database::Error>,
        > + Database<Insert<Request>, Err = Traced<database::Error>>,
{
    type Ok = Request;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateBookingRequest,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateBookingRequest {
            customer_name,
            customer_phone,
            room_id,
            number_of_people,
            check_in,
            check_out,
            duration,
            early_check_in_cost,
            late_check_out_cost,
            remarks,
        } = cmd;

        let stay = Stay::new(check_in, check_out)
            .map_err(|_| E::InvalidInterval)
            .map_err(tracerr::wrap!())?;
        if !self.accepts(early_check_in_cost.iter().chain(&late_check_out_cost))
        {
            return Err(tracerr::new!(E::CurrencyMismatch));
        }
        if !cost::non_negative(
            early_check_in_cost.iter().chain(&late_check_out_cost),
        ) {
            return Err(tracerr::new!(E::NegativeCost));
        }

        let room = self
            .database()
            .execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())?;

        let configurations = self
            .database()
            .execute(Select(By::<Vec<Configuration>, _>::new(
                read::room::configuration::Filter::room(room_id),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let rates = Rates::resolve(&room, &configurations, number_of_people)
            .map_err(|e| E::pricing(e, room_id, number_of_people))
            .map_err(tracerr::wrap!())?;
        let charges =
            Charges::new(rates, early_check_in_cost, late_check_out_cost);
        let total_amount = charges
            .total(duration, &stay)
            .map_err(|e| E::pricing(e, room_id, number_of_people))
            .map_err(tracerr::wrap!())?;

        let occupying = self
            .database()
            .execute(Select(By::<Vec<Booking>, _>::new(
                read::booking::Occupying {
                    room_id: Some(room_id),
                    during: Some(stay),
                },
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !availability::is_available(room_id, &stay, &occupying) {
            return Err(tracerr::new!(E::RoomUnavailable(room_id)));
        }

        let now = DateTime::now();
        let request = Request {
            id: request::Id::new(),
            customer_name,
            customer_phone,
            room_id,
            number_of_people,
            stay,
            duration,
            charges,
            total_amount,
            status: request::Status::Pending,
            remarks,
            rejection_reason: None,
            booking_id: None,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        self.database()
            .execute(Insert(request.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(request)
    }
}

/// Error of [`CreateBookingRequest`] [`Command`] execution.
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

    /// [`Room`] is occupied by a [`Booking`] for the requested period.
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
