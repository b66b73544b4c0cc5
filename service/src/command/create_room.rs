//! [`Command`] for creating a new [`Room`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
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

/// [`Command`] for creating a new [`Room`].
#[derive(Clone, Debug)]
pub struct CreateRoom {
    /// [`room::Number`] of a new [`Room`].
    pub number: room::Number,

    /// [`room::Bathroom`] of a new [`Room`].
    pub bathroom: room::Bathroom,

    /// Indicator whether a new [`Room`] is offered for bookings.
    pub is_available: bool,

    /// [`Description`] of a new [`Room`].
    pub description: Option<Description>,

    /// Reference daily cost of a new [`Room`].
    pub daily_cost: Option<Money>,

    /// Reference monthly cost of a new [`Room`].
    pub monthly_cost: Option<Money>,
}

impl<Db> Command<CreateRoom> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: for<'n> Database<
            Lock<By<Room, &'n room::Number>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + for<'n> Database<
            Select<By<Option<Room>, &'n room::Number>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + Database<Insert<Room>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Room;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateRoom) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateRoom {
            number,
            bathroom,
            is_available,
            description,
            daily_cost,
            monthly_cost,
        } = cmd;

        if !self.accepts(daily_cost.iter().chain(&monthly_cost)) {
            return Err(tracerr::new!(E::CurrencyMismatch));
        }
        if !cost::non_negative(daily_cost.iter().chain(&monthly_cost)) {
            return Err(tracerr::new!(E::NegativeCost));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Serialize all the claims of the same `room::Number`.
        tx.execute(Lock(By::new(&number)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let existing = tx
            .execute(Select(By::<Option<Room>, _>::new(&number)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::NumberOccupied(number)));
        }

        let now = DateTime::now();
        let room = Room {
            id: room::Id::new(),
            number,
            bathroom,
            is_available,
            description,
            daily_cost,
            monthly_cost,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        tx.execute(Insert(room.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(room)
    }
}

/// Error of [`CreateRoom`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

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
