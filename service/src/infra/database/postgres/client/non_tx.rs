//! [`NonTx`] client definitions.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection as _},
};

/// Non-transactional Postgres database client.
///
/// Takes a [`connection::NonTx`] from the [`connection::Pool`] on its first
/// use and shares it with all its clones.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`connection::Pool`] the client takes its connections from.
    pub(crate) pool: connection::Pool,

    /// Lazily taken [`connection::NonTx`].
    connection: Arc<OnceCell<connection::NonTx>>,
}

impl NonTx {
    /// Creates a new [`NonTx`] client upon the provided [`connection::Pool`].
    #[must_use]
    pub(crate) fn from_pool(pool: connection::Pool) -> Self {
        Self {
            pool,
            connection: Arc::default(),
        }
    }

    /// Returns the [`connection::NonTx`] of this client, taking it from the
    /// [`connection::Pool`] if there is none yet.
    async fn connection(
        &self,
    ) -> Result<&connection::NonTx, Traced<database::Error>> {
        self.connection
            .get_or_try_init(|| async {
                self.pool
                    .get()
                    .await
                    .map_err(tracerr::from_and_wrap!(=> postgres::Error))
                    .map_err(tracerr::map_from)
            })
            .await
    }
}

connection::impl_connection! {
    NonTx => |c| c.connection().await.map_err(tracerr::wrap!())?;
    exec: exec,
    batch_exec: batch_exec;
    map_err: tracerr::wrap!(),
}
