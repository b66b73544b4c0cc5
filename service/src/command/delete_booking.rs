//! [`Command`] for deleting a [`Booking`].

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Invoice, Payment};
use crate::{
    domain::{booking, Booking},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Booking`] in any status.
///
/// [`Payment`]s and [`Invoice`]s of the [`Booking`] are deleted along.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteBooking {
    /// ID of the [`Booking`] to delete.
    pub booking_id: booking::Id,
}

impl<Db> Command<DeleteBooking> for Service<Db>
where
    Db: Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Booking, booking::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = Booking;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteBooking { booking_id } = cmd;

        let booking = self
            .database()
            .execute(Select(By::<Option<Booking>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BookingNotExists(booking_id))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Delete(By::<Booking, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(booking)
    }
}

/// Error of [`DeleteBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Booking`] doesn't exist.
    #[display("`Booking(id: {_0})` does not exist")]
    #[from(ignore)]
    BookingNotExists(#[error(not(source))] booking::Id),
}
