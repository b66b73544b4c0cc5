//! [`Command`] for deleting a [`Room`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Booking;
use crate::{
    domain::{room, Room},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for deleting a [`Room`] along with its
/// [`room::Configuration`]s.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteRoom {
    /// ID of the [`Room`] to delete.
    pub room_id: room::Id,
}

impl<Db> Command<DeleteRoom> for Service<Db>
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
        > + Database<
            Select<By<read::room::InUse, room::Id>>,
            Ok = read::room::InUse,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Room, room::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Room;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: DeleteRoom) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteRoom { room_id } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid booking the `Room` while it's being deleted.
        tx.execute(Lock(By::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let room = tx
            .execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())?;

        let in_use = tx
            .execute(Select(By::<read::room::InUse, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if *in_use {
            return Err(tracerr::new!(E::RoomInUse(room_id)));
        }

        tx.execute(Delete(By::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(room)
    }
}

/// Error of [`DeleteRoom`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Room`] doesn't exist.
    #[display("`Room(id: {_0})` does not exist")]
    #[from(ignore)]
    RoomNotExists(#[error(not(source))] room::Id),

    /// [`Room`] is still referenced by some [`Booking`]s.
    #[display("`Room(id: {_0})` is referenced by bookings")]
    #[from(ignore)]
    RoomInUse(#[error(not(source))] room::Id),
}
