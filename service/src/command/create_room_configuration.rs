//! [`Command`] for creating a new [`Configuration`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        cost,
        room::{self, configuration, configuration::PersonCount, Configuration},
        text::Description,
        Room,
    },
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for creating a new [`Configuration`] of a [`Room`].
#[derive(Clone, Debug)]
pub struct CreateRoomConfiguration {
    /// ID of the [`Room`] a new [`Configuration`] prices.
    pub room_id: room::Id,

    /// [`PersonCount`] a new [`Configuration`] applies to.
    pub person_count: PersonCount,

    /// Daily cost of a new [`Configuration`].
    pub daily_cost: Money,

    /// Monthly cost of a new [`Configuration`].
    pub monthly_cost: Money,

    /// Indicator whether a new [`Configuration`] is offered for bookings.
    pub is_available: bool,

    /// [`Description`] of a new [`Configuration`].
    pub description: Option<Description>,
}

impl<Db> Command<CreateRoomConfiguration> for Service<Db>
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
            Select<
                By<Vec<Configuration>, read::room::configuration::Filter>,
            >,
            Ok = Vec<Configuration>,
            Err = Traced<database::Error>,
        > + Database<Insert<Configuration>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Configuration;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateRoomConfiguration,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateRoomConfiguration {
            room_id,
            person_count,
            daily_cost,
            monthly_cost,
            is_available,
            description,
        } = cmd;

        if !self.accepts([&daily_cost, &monthly_cost]) {
            return Err(tracerr::new!(E::CurrencyMismatch));
        }
        if !cost::non_negative([&daily_cost, &monthly_cost]) {
            return Err(tracerr::new!(E::NegativeCost));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of the same tier.
        tx.execute(Lock(By::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let existing = tx
            .execute(Select(By::<Vec<Configuration>, _>::new(
                read::room::configuration::Filter {
                    room_id: Some(room_id),
                    person_count: Some(person_count),
                    is_available: None,
                },
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !existing.is_empty() {
            return Err(tracerr::new!(E::ConfigurationExists {
                room_id,
                person_count,
            }));
        }

        let now = DateTime::now();
        let configuration = Configuration {
            id: configuration::Id::new(),
            room_id,
            person_count,
            daily_cost,
            monthly_cost,
            is_available,
            description,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        tx.execute(Insert(configuration.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(configuration)
    }
}

/// Error of [`CreateRoomConfiguration`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Room`] doesn't exist.
    #[display("`Room(id: {_0})` does not exist")]
    #[from(ignore)]
    RoomNotExists(#[error(not(source))] room::Id),

    /// [`Room`] already has a [`Configuration`] for the [`PersonCount`].
    #[display(
        "`Room(id: {room_id})` already has a configuration for \
         {person_count} people"
    )]
    #[from(ignore)]
    ConfigurationExists {
        /// ID of the [`Room`].
        room_id: room::Id,

        /// [`PersonCount`] the existing [`Configuration`] applies to.
        person_count: PersonCount,
    },

    /// Cost is given in a currency other than the property one.
    #[display("Cost currency differs from the property one")]
    CurrencyMismatch,

    /// Cost is negative.
    #[display("Cost must not be negative")]
    #[from(ignore)]
    NegativeCost,
}
