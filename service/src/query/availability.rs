//! [`Availability`] definition.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        availability,
        booking::{stay, Stay},
        room, Booking, Room,
    },
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] checking whether a [`Room`] is free for a [`Stay`].
///
/// An occupied [`Room`] is a negative answer rather than an error.
#[derive(Clone, Copy, Debug)]
pub struct Availability {
    /// ID of the [`Room`] to check.
    pub room_id: room::Id,

    /// Check-in [`DateTime`].
    ///
    /// [`DateTime`]: common::DateTime
    pub check_in: stay::CheckInDateTime,

    /// Check-out [`DateTime`].
    ///
    /// [`DateTime`]: common::DateTime
    pub check_out: stay::CheckOutDateTime,
}

impl<Db> Query<Availability> for Service<Db>
where
    Db: Database<
            Select<By<Option<Room>, room::Id>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Booking>, read::booking::Occupying>>,
            Ok = Vec<Booking>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = bool;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        Availability {
            room_id,
            check_in,
            check_out,
        }: Availability,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let stay = Stay::new(check_in, check_out)
            .map_err(|_| E::InvalidInterval)
            .map_err(tracerr::wrap!())?;

        let room = self
            .database()
            .execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if room.is_none() {
            return Err(tracerr::new!(E::RoomNotExists(room_id)));
        }

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

        Ok(availability::is_available(room_id, &stay, &occupying))
    }
}

/// Error of [`Availability`] [`Query`] execution.
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
}
