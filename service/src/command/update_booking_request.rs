//! [`Command`] for updating a pending booking [`Request`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Booking;
use crate::{
    domain::{
        booking::{self, request, DurationType, Request, Stay},
        cost::{self, Rates},
        customer,
        room::{self, configuration::PersonCount, Configuration},
        text::Remarks,
        Room,
    },
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for updating a pending booking [`Request`].
///
/// [`None`] fields are left untouched. The [`Request`] is repriced by the
/// current [`Room`] rates.
#[derive(Clone, Debug, Default)]
pub struct UpdateBookingRequest {
    /// ID of the [`Request`] to update.
    pub request_id: request::Id,

    /// New [`customer::Name`] of the requesting customer.
    pub customer_name: Option<customer::Name>,

    /// ID of the new requested [`Room`].
    pub room_id: Option<room::Id>,

    /// New number of people going to stay.
    pub number_of_people: Option<PersonCount>,

    /// New check-in [`DateTime`].
    pub check_in: Option<booking::stay::CheckInDateTime>,

    /// New check-out [`DateTime`].
    pub check_out: Option<booking::stay::CheckOutDateTime>,

    /// New [`DurationType`] to bill the [`Booking`] by.
    pub duration: Option<DurationType>,

    /// New early check-in surcharge, or its removal.
    pub early_check_in_cost: Option<Option<Money>>,

    /// New late check-out surcharge, or its removal.
    pub late_check_out_cost: Option<Option<Money>>,

    /// New [`Remarks`] about the [`Request`], or their removal.
    pub remarks: Option<Option<Remarks>>,
}

impl<Db> Command<UpdateBookingRequest> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Request, request::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Request>, request::Id>>,
            Ok = Option<Request>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Room>, room::Id>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Configuration>, read::room::configuration::Filter>>,
            Ok = Vec<Configuration>,
            Err = Traced<database::Error>,
        > + Database<Update<Request>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Request;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateBookingRequest,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateBookingRequest {
            request_id,
            customer_name,
            room_id,
            number_of_people,
            check_in,
            check_out,
            duration,
            early_check_in_cost,
            late_check_out_cost,
            remarks,
        } = cmd;

        let given_costs = early_check_in_cost
            .iter()
            .chain(&late_check_out_cost)
            .flatten()
            .collect::<Vec<_>>();
        if !cost::non_negative(given_costs.iter().copied()) {
            return Err(tracerr::new!(E::NegativeCost));
        }
        if !self.accepts(given_costs) {
            return Err(tracerr::new!(E::CurrencyMismatch));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Request`.
        tx.execute(Lock(By::new(request_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut request = tx
            .execute(Select(By::<Option<Request>, _>::new(request_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RequestNotExists(request_id))
            .map_err(tracerr::wrap!())?;
        if !request.is_pending() {
            return Err(tracerr::new!(E::RequestNotPending(request_id)));
        }

        let room_id = room_id.unwrap_or(request.room_id);
        let room = tx
            .execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())?;

        request.stay = Stay::new(
            check_in.unwrap_or_else(|| request.stay.check_in()),
            check_out.unwrap_or_else(|| request.stay.check_out()),
        )
        .map_err(|_| E::InvalidInterval)
        .map_err(tracerr::wrap!())?;
        request.room_id = room_id;
        if let Some(name) = customer_name {
            request.customer_name = name;
        }
        if let Some(people) = number_of_people {
            request.number_of_people = people;
        }
        if let Some(duration) = duration {
            request.duration = duration;
        }
        if let Some(cost) = early_check_in_cost {
            request.charges.early_check_in_cost = cost;
        }
        if let Some(cost) = late_check_out_cost {
            request.charges.late_check_out_cost = cost;
        }
        if let Some(remarks) = remarks {
            request.remarks = remarks;
        }

        let people = request.number_of_people;
        let configurations = tx
            .execute(Select(By::<Vec<Configuration>, _>::new(
                read::room::configuration::Filter::room(room_id),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let rates = Rates::resolve(&room, &configurations, people)
            .map_err(|e| E::pricing(e, room_id, people))
            .map_err(tracerr::wrap!())?;
        request.charges.daily_cost = rates.daily_cost;
        request.charges.monthly_cost = rates.monthly_cost;
        request.total_amount = request
            .charges
            .total(request.duration, &request.stay)
            .map_err(|e| E::pricing(e, room_id, people))
            .map_err(tracerr::wrap!())?;
        request.updated_at = DateTime::now().coerce();

        tx.execute(Update(request.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(request)
    }
}

/// Error of [`UpdateBookingRequest`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Request`] doesn't exist.
    #[display("`BookingRequest(id: {_0})` does not exist")]
    #[from(ignore)]
    RequestNotExists(#[error(not(source))] request::Id),

    /// [`Request`] is decided already.
    #[display("`BookingRequest(id: {_0})` is not pending")]
    #[from(ignore)]
    RequestNotPending(#[error(not(source))] request::Id),

    /// [`Room`] doesn't exist.
    #[display("`Room(id: {_0})` does not exist")]
    #[from(ignore)]
    RoomNotExists(#[error(not(source))] room::Id),

    /// Check-out doesn't go after check-in.
    #[display("Check-out must go strictly after check-in")]
    #[from(ignore)]
    InvalidInterval,

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
