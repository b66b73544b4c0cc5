//! [`Command`] for deleting a booking [`Request`].

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::booking::{request, Request},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a booking [`Request`] in any status.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteBookingRequest {
    /// ID of the [`Request`] to delete.
    pub request_id: request::Id,
}

impl<Db> Command<DeleteBookingRequest> for Service<Db>
where
    Db: Database<
            Select<By<Option<Request>, request::Id>>,
            Ok = Option<Request>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Request, request::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = Request;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteBookingRequest,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteBookingRequest { request_id } = cmd;

        let request = self
            .database()
            .execute(Select(By::<Option<Request>, _>::new(request_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RequestNotExists(request_id))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Delete(By::<Request, _>::new(request_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(request)
    }
}

/// Error of [`DeleteBookingRequest`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Request`] doesn't exist.
    #[display("`BookingRequest(id: {_0})` does not exist")]
    #[from(ignore)]
    RequestNotExists(#[error(not(source))] request::Id),
}
