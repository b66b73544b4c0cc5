//! [`Tx`] client definitions.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection as _},
};

use super::NonTx;

/// Transactional Postgres database client.
///
/// Starts its [`connection::Tx`] on the first executed statement, so a client
/// nothing is executed with never touches the [`connection::Pool`].
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`connection::Pool`] the client takes its connection from.
    pool: connection::Pool,

    /// Running [`connection::Tx`], if any.
    tx: Arc<RwLock<Option<connection::Tx>>>,
}

impl Tx {
    /// Creates a new [`Tx`] client upon the pool of the provided [`NonTx`]
    /// client.
    #[must_use]
    pub fn from_non_tx(client: NonTx) -> Self {
        Self {
            pool: client.pool,
            tx: Arc::default(),
        }
    }

    /// Returns the running [`connection::Tx`] of this client, starting a new
    /// one if there is none.
    async fn connection(
        &self,
    ) -> Result<RwLockReadGuard<'_, connection::Tx>, Traced<database::Error>>
    {
        loop {
            let guard = self.tx.read().await;
            if let Ok(tx) = RwLockReadGuard::try_map(guard, Option::as_ref) {
                return Ok(tx);
            }

            let mut slot = self.tx.write().await;
            if slot.is_none() {
                let conn = self
                    .pool
                    .get()
                    .await
                    .map_err(tracerr::from_and_wrap!(=> postgres::Error))
                    .map_err(tracerr::map_from)?;
                *slot = Some(
                    connection::Tx::from_non_tx(conn)
                        .await
                        .map_err(tracerr::wrap!())?,
                );
            }
        }
    }

    /// Commits the running transaction of this client, if any.
    ///
    /// Next statement executed with this client starts a new transaction.
    ///
    /// # Errors
    ///
    /// If failed to commit the transaction.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let Some(tx) = self.tx.write().await.take() else {
            return Ok(());
        };
        tx.commit().await.map_err(tracerr::wrap!())
    }
}

connection::impl_connection! {
    Tx => |c| c.connection().await.map_err(tracerr::wrap!())?;
    exec: exec,
    batch_exec: batch_exec;
    map_err: tracerr::wrap!(),
}
