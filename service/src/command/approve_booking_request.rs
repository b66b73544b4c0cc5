//! [`Command`] for approving a booking [`Request`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        availability,
        booking::{self, request, PaymentStatus, Request},
        customer, room, Booking, Customer, Room,
    },
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for approving a pending booking [`Request`].
///
/// Re-checks the [`Room`] availability and either turns the [`Request`] into
/// a confirmed [`Booking`], or rejects it if the [`Room`] got occupied
/// meanwhile. Both happen atomically.
#[derive(Clone, Copy, Debug, From)]
pub struct ApproveBookingRequest {
    /// ID of the [`Request`] to approve.
    pub request_id: request::Id,
}

/// Outcome of an [`ApproveBookingRequest`] [`Command`].
#[derive(Clone, Debug)]
pub struct Approval {
    /// Decided [`Request`].
    pub request: Request,

    /// [`Booking`] the [`Request`] was turned into, if it was approved.
    pub booking: Option<Booking>,
}

impl<Db> Command<ApproveBookingRequest> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Request, request::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Room, room::Id>>,
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
        > + for<'p> Database<
            Select<By<Option<Customer>, &'p customer::Phone>>,
            Ok = Option<Customer>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Booking>, read::booking::Occupying>>,
            Ok = Vec<Booking>,
            Err = Traced<database::Error>,
        > + Database<Insert<Customer>, Err = Traced<database::Error>>
        + Database<Insert<Booking>, Err = Traced<database::Error>>
        + Database<Update<Request>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Approval;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ApproveBookingRequest,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ApproveBookingRequest { request_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Request`.
        tx.execute(Lock(By::<Request, _>::new(request_id)))
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

        let room_id = request.room_id;
        // Serialize all the bookings of the same `Room`.
        tx.execute(Lock(By::<Room, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let room = tx
            .execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if room.is_none() {
            return Err(tracerr::new!(E::RoomNotExists(room_id)));
        }

        let occupying = tx
            .execute(Select(By::<Vec<Booking>, _>::new(
                read::booking::Occupying {
                    room_id: Some(room_id),
                    during: Some(request.stay),
                },
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let now = DateTime::now();
        request.updated_at = now.coerce();

        if !availability::is_available(room_id, &request.stay, &occupying) {
            log::info!(
                "`BookingRequest(id: {request_id})` is rejected: \
                 `Room(id: {room_id})` is occupied for the requested period",
            );
            request.status = request::Status::Rejected;
            request.rejection_reason =
                Some(request::RejectionReason::room_unavailable());

            tx.execute(Update(request.clone()))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            tx.execute(Commit)
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;

            return Ok(Approval {
                request,
                booking: None,
            });
        }

        let customer = tx
            .execute(Select(By::<Option<Customer>, _>::new(
                &request.customer_phone,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if customer.is_none() {
            log::info!(
                "Creating `Customer(phone: {})` for approved \
                 `BookingRequest(id: {request_id})`",
                request.customer_phone,
            );
            tx.execute(Insert(Customer {
                phone: request.customer_phone.clone(),
                name: request.customer_name.clone(),
                email: None,
                password_hash: None,
                additional_phone: None,
                documents_url: None,
                photo_id_proof_url: None,
                id_proof_urls: vec![],
                remarks: None,
                created_at: now.coerce(),
                updated_at: now.coerce(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        }

        let booking = Booking {
            id: booking::Id::new(),
            customer_phone: request.customer_phone.clone(),
            room_id,
            number_of_people: request.number_of_people,
            stay: request.stay,
            duration: request.duration,
            status: booking::Status::Confirmed,
            payment_status: PaymentStatus::Pending,
            charges: request.charges,
            total_amount: request.total_amount,
            remarks: request.remarks.clone(),
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };
        tx.execute(Insert(booking.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        request.status = request::Status::Approved;
        request.booking_id = Some(booking.id);
        tx.execute(Update(request.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Approval {
            request,
            booking: Some(booking),
        })
    }
}

/// Error of [`ApproveBookingRequest`] [`Command`] execution.
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

    /// [`Room`] of the [`Request`] doesn't exist anymore.
    #[display("`Room(id: {_0})` does not exist")]
    #[from(ignore)]
    RoomNotExists(#[error(not(source))] room::Id),
}
