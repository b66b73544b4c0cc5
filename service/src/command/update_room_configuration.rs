//! [`Command`] for updating a [`Configuration`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
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

/// [`Command`] for updating a [`Configuration`].
///
/// [`None`] fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct UpdateRoomConfiguration {
    /// ID of the [`Configuration`] to update.
    pub configuration_id: configuration::Id,

    /// New [`PersonCount`] of the [`Configuration`].
    pub person_count: Option<PersonCount>,

    /// New daily cost of the [`Configuration`].
    pub daily_cost: Option<Money>,

    /// New monthly cost of the [`Configuration`].
    pub monthly_cost: Option<Money>,

    /// New availability flag of the [`Configuration`].
    pub is_available: Option<bool>,

    /// New [`Description`] of the [`Configuration`], or its removal.
    pub description: Option<Option<Description>>,
}

impl<Db> Command<UpdateRoomConfiguration> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Configuration>, configuration::Id>>,
            Ok = Option<Configuration>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Lock<By<Room, room::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Configuration>, configuration::Id>>,
            Ok = Option<Configuration>,
            Err = Traced<database::Error>,
        > + Database<
            Select<
                By<Vec<Configuration>, read::room::configuration::Filter>,
            >,
            Ok = Vec<Configuration>,
            Err = Traced<database::Error>,
        > + Database<
            Update<Configuration>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Configuration;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateRoomConfiguration,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateRoomConfiguration {
            configuration_id: id,
            person_count,
            daily_cost,
            monthly_cost,
            is_available,
            description,
        } = cmd;

        if !self.accepts(daily_cost.iter().chain(&monthly_cost)) {
            return Err(tracerr::new!(E::CurrencyMismatch));
        }
        if !cost::non_negative(daily_cost.iter().chain(&monthly_cost)) {
            return Err(tracerr::new!(E::NegativeCost));
        }

        let room_id = self
            .database()
            .execute(Select(By::<Option<Configuration>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ConfigurationNotExists(id))
            .map_err(tracerr::wrap!())?
            .room_id;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent changes of the `Room` tiers.
        tx.execute(Lock(By::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut configuration = tx
            .execute(Select(By::<Option<Configuration>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ConfigurationNotExists(id))
            .map_err(tracerr::wrap!())?;

        if let Some(count) =
            person_count.filter(|c| *c != configuration.person_count)
        {
            let existing = tx
                .execute(Select(By::<Vec<Configuration>, _>::new(
                    read::room::configuration::Filter {
                        room_id: Some(room_id),
                        person_count: Some(count),
                        is_available: None,
                    },
                )))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if !existing.is_empty() {
                return Err(tracerr::new!(E::ConfigurationExists {
                    room_id,
                    person_count: count,
                }));
            }
            configuration.person_count = count;
        }
        if let Some(cost) = daily_cost {
            configuration.daily_cost = cost;
        }
        if let Some(cost) = monthly_cost {
            configuration.monthly_cost = cost;
        }
        if let Some(is_available) = is_available {
            configuration.is_available = is_available;
        }
        if let Some(description) = description {
            configuration.description = description;
        }
        configuration.updated_at = DateTime::now().coerce();

        tx.execute(Update(configuration.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(configuration)
    }
}

/// Error of [`UpdateRoomConfiguration`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Configuration`] doesn't exist.
    #[display("`Configuration(id: {_0})` does not exist")]
    #[from(ignore)]
    ConfigurationNotExists(#[error(not(source))] configuration::Id),

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
