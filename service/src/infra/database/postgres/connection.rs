//! [`Connection`] definitions.

use std::{fmt, future::Future};

use futures::{FutureExt as _, TryFutureExt as _};
use ouroboros::self_referencing;
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;

use crate::infra::database::{self, postgres};

pub use deadpool_postgres::{
    Client as NonTx, CreatePoolError as PoolCreationError, Pool, PoolError,
};
pub use tokio_postgres::Error;

/// Generic database connection.
pub trait Connection {
    /// Queries the provided statement and returns all the resulting rows.
    ///
    /// # Errors
    ///
    /// If failed to query the statement.
    fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = Result<Vec<Row>, Traced<database::Error>>>
    where
        T: ToStatement + ?Sized;

    /// Queries the provided statement and returns at most one resulting row.
    ///
    /// # Errors
    ///
    /// If failed to query the statement, or it returned more than one row.
    fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = Result<Option<Row>, Traced<database::Error>>>
    where
        T: ToStatement + ?Sized;

    /// Executes the provided statement and returns the number of affected
    /// rows.
    ///
    /// # Errors
    ///
    /// If failed to execute the statement.
    fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl Future<Output = Result<u64, Traced<database::Error>>>
    where
        T: ToStatement + ?Sized;

    /// Executes the provided semicolon-separated statements.
    ///
    /// # Errors
    ///
    /// If failed to execute any of the statements.
    fn batch_exec(
        &self,
        stmt: &str,
    ) -> impl Future<Output = Result<(), Traced<database::Error>>>;
}

/// Implements [`Connection`] for a type by delegating to the client returned
/// by the provided expression.
macro_rules! impl_connection {
    (
        $ty:ty => |$this:ident| $client:expr;
        exec: $exec:ident,
        batch_exec: $batch_exec:ident;
        map_err: $($map:expr),+ $(,)?
    ) => {
        impl $crate::infra::database::postgres::Connection for $ty {
            async fn query<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ::tokio_postgres::types::ToSql + Sync)],
            ) -> Result<
                Vec<::tokio_postgres::Row>,
                ::tracerr::Traced<$crate::infra::database::Error>,
            >
            where
                T: ::tokio_postgres::ToStatement + ?Sized,
            {
                let $this = self;
                $client.query(stmt, params).await$(.map_err($map))+
            }

            async fn query_opt<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ::tokio_postgres::types::ToSql + Sync)],
            ) -> Result<
                Option<::tokio_postgres::Row>,
                ::tracerr::Traced<$crate::infra::database::Error>,
            >
            where
                T: ::tokio_postgres::ToStatement + ?Sized,
            {
                let $this = self;
                $client.query_opt(stmt, params).await$(.map_err($map))+
            }

            async fn exec<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ::tokio_postgres::types::ToSql + Sync)],
            ) -> Result<u64, ::tracerr::Traced<$crate::infra::database::Error>>
            where
                T: ::tokio_postgres::ToStatement + ?Sized,
            {
                let $this = self;
                $client.$exec(stmt, params).await$(.map_err($map))+
            }

            async fn batch_exec(
                &self,
                stmt: &str,
            ) -> Result<(), ::tracerr::Traced<$crate::infra::database::Error>>
            {
                let $this = self;
                $client.$batch_exec(stmt).await$(.map_err($map))+
            }
        }
    };
}
pub(crate) use impl_connection;

/// Transactional Postgres database [`Connection`].
#[self_referencing]
pub struct Tx {
    /// [`NonTx`] [`Connection`] the transaction is running in.
    non_tx: NonTx,

    /// Transaction running in the [`NonTx`] [`Connection`].
    ///
    /// [`None`] once committed.
    #[borrows(mut non_tx)]
    #[not_covariant]
    tx: Option<deadpool_postgres::Transaction<'this>>,
}

impl fmt::Debug for Tx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tx")
            .field("is_committed", &self.with_tx(|tx| tx.is_none()))
            .finish_non_exhaustive()
    }
}

impl Tx {
    /// Starts a new [`Tx`] in the provided [`NonTx`] [`Connection`].
    ///
    /// # Errors
    ///
    /// If failed to start a transaction.
    pub async fn from_non_tx(
        client: NonTx,
    ) -> Result<Tx, Traced<database::Error>> {
        Tx::try_new_async_send(client, |c| c.transaction().map_ok(Some).boxed())
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    /// Returns the running transaction of this [`Tx`].
    fn tx(&self) -> &deadpool_postgres::Transaction<'_> {
        self.with_tx(|tx| {
            tx.as_ref()
                .expect("`Tx` is consumed by committing, so it always runs")
        })
    }

    /// Commits this [`Tx`].
    ///
    /// # Errors
    ///
    /// If failed to commit this [`Tx`].
    pub async fn commit(mut self) -> Result<(), Traced<database::Error>> {
        #[expect(
            clippy::redundant_closure_for_method_calls,
            reason = "different variance, see \
                      https://doc.rust-lang.org/nomicon/subtyping.html#variance"
        )]
        let Some(tx) = self.with_tx_mut(|tx| tx.take()) else {
            return Ok(());
        };
        tx.commit()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

impl_connection! {
    NonTx => |c| (**c);
    exec: execute,
    batch_exec: batch_execute;
    map_err: tracerr::from_and_wrap!(=> postgres::Error), tracerr::map_from,
}

impl_connection! {
    Tx => |c| c.tx();
    exec: execute,
    batch_exec: batch_execute;
    map_err: tracerr::from_and_wrap!(=> postgres::Error), tracerr::map_from,
}
