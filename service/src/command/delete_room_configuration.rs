//! [`Command`] for deleting a [`Configuration`].

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::room::{configuration, Configuration},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Configuration`].
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteRoomConfiguration {
    /// ID of the [`Configuration`] to delete.
    pub configuration_id: configuration::Id,
}

impl<Db> Command<DeleteRoomConfiguration> for Service<Db>
where
    Db: Database<
            Select<By<Option<Configuration>, configuration::Id>>,
            Ok = Option<Configuration>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Configuration, configuration::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = Configuration;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteRoomConfiguration,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteRoomConfiguration {
            configuration_id: id,
        } = cmd;

        let configuration = self
            .database()
            .execute(Select(By::<Option<Configuration>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ConfigurationNotExists(id))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(configuration)
    }
}

/// Error of [`DeleteRoomConfiguration`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Configuration`] doesn't exist.
    #[display("`Configuration(id: {_0})` does not exist")]
    #[from(ignore)]
    ConfigurationNotExists(#[error(not(source))] configuration::Id),
}
