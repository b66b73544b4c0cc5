//! [`Command`] for rejecting a booking [`Request`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::booking::{request, Request},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for rejecting a pending booking [`Request`].
#[derive(Clone, Debug)]
pub struct RejectBookingRequest {
    /// ID of the [`Request`] to reject.
    pub request_id: request::Id,

    /// [`request::RejectionReason`] to reject the [`Request`] with.
    pub reason: request::RejectionReason,
}

impl<Db> Command<RejectBookingRequest> for Service<Db>
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
        > + Database<Update<Request>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Request;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RejectBookingRequest,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RejectBookingRequest { request_id, reason } = cmd;

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

        request.status = request::Status::Rejected;
        request.rejection_reason = Some(reason);
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

/// Error of [`RejectBookingRequest`] [`Command`] execution.
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
}
