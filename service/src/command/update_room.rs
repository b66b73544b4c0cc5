//! [`Command`] for updating a [`Room`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{cost, room, text::Description, Room},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Room`].
///
/// [`None`] fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct UpdateRoom {
    /// ID of the [`Room`] to update.
    pub room_id: room::Id,

    /// New [`room::Number`] of the [`Room`].
    pub number: Option<room::Number>,

    /// New [`room::Bathroom`] of the [`Room`].
    pub bathroom: Option<room::Bathroom>,

    /// New availability flag of the [`Room`].
    pub is_available: Option<bool>,

    /// New [`Description`] of the [`Room`], or its removal.
    pub description: Option<Option<Description>>,

    /// New reference daily cost of the [`Room`], or its removal.
    pub daily_cost: Option<Option<Money>>,

    /// New reference monthly cost of the [`Room`], or its removal.
    pub monthly_cost: Option<Option<Money>>,
}

impl<Db> Command<UpdateRoom> for Service<Db>
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
        > + for<'n> Database<
            Lock<By<Room, &'n room::Number>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + for<'n> Database<
            Select<By<Option<Room>, &'n room::Number>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + Database<Update<Room>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Room;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateRoom) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateRoom {
            room_id,
            number,
            bathroom,
            is_available,
            description,
            daily_cost,
            monthly_cost,
        } = cmd;

        {
            let new_costs = daily_cost.iter().chain(&monthly_cost).flatten();
            if !cost::non_negative(new_costs.clone()) {
                return Err(tracerr::new!(E::NegativeCost));
            }
            if !self.accepts(new_costs) {
                return Err(tracerr::new!(E::CurrencyMismatch));
            }
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Room`.
        tx.execute(Lock(By::<Room, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut room = tx
            .execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())?;

        if let Some(number) = number.filter(|n| *n != room.number) {
            tx.execute(Lock(By::<Room, _>::new(&number)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            let occupied = tx
                .execute(Select(By::<Option<Room>, _>::new(&number)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .is_some();
            if occupied {
                return Err(tracerr::new!(E::NumberOccupied(number)));
            }
            room.number = number;
        }
        if let Some(bathroom) = bathroom {
            room.bathroom = bathroom;
        }
        if let Some(is_available) = is_available {
            room.is_available = is_available;
        }
        if let Some(description) = description {
            room.description = description;
        }
        if let Some(cost) = daily_cost {
            room.daily_cost = cost;
        }
        if let Some(cost) = monthly_cost {
            room.monthly_cost = cost;
        }
        room.updated_at = DateTime::now().coerce();

        tx.execute(Update(room.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(room)
    }
}

/// Error of [`UpdateRoom`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Room`] doesn't exist.
    #[display("`Room(id: {_0})` does not exist")]
    #[from(ignore)]
    RoomNotExists(#[error(not(source))] room::Id),

    /// [`room::Number`] is already occupied by another [`Room`].
    #[display("`{_0}` room number is occupied")]
    #[from(ignore)]
    NumberOccupied(#[error(not(source))] room::Number),

    /// Cost is given in a currency other than the property one.
    #[display("Cost currency differs from the property one")]
    CurrencyMismatch,

    /// Cost is negative.
    #[display("Cost must not be negative")]
    #[from(ignore)]
    NegativeCost,
}
