//! [`Command`] for deleting a [`Customer`].

use common::operations::{
    By, Commit, Delete, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{booking::Request, Booking};
use crate::{
    domain::{customer, Customer},
    infra::{database, Database},
    read, Service,
};

use super::Command;

/// [`Command`] for deleting a [`Customer`].
#[derive(Clone, Debug, From)]
pub struct DeleteCustomer {
    /// [`customer::Phone`] of the [`Customer`] to delete.
    pub phone: customer::Phone,
}

impl<Db> Command<DeleteCustomer> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: for<'p> Database<
            Lock<By<Customer, &'p customer::Phone>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + for<'p> Database<
            Select<By<Option<Customer>, &'p customer::Phone>>,
            Ok = Option<Customer>,
            Err = Traced<database::Error>,
        > + for<'p> Database<
            Select<By<read::customer::InUse, &'p customer::Phone>>,
            Ok = read::customer::InUse,
            Err = Traced<database::Error>,
        > + for<'p> Database<
            Delete<By<Customer, &'p customer::Phone>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Customer;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteCustomer,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteCustomer { phone } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Customer`.
        tx.execute(Lock(By::new(&phone)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let customer = tx
            .execute(Select(By::<Option<Customer>, _>::new(&phone)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::CustomerNotExists(phone.clone()))
            .map_err(tracerr::wrap!())?;

        let in_use = tx
            .execute(Select(By::<read::customer::InUse, _>::new(&phone)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if *in_use {
            return Err(tracerr::new!(E::CustomerInUse(phone)));
        }

        tx.execute(Delete(By::<Customer, _>::new(&phone)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(customer)
    }
}

/// Error of [`DeleteCustomer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Customer`] doesn't exist.
    #[display("`Customer(phone: {_0})` does not exist")]
    #[from(ignore)]
    CustomerNotExists(#[error(not(source))] customer::Phone),

    /// [`Customer`] is still referenced by some [`Booking`]s or [`Request`]s.
    #[display("`Customer(phone: {_0})` is referenced by bookings")]
    #[from(ignore)]
    CustomerInUse(#[error(not(source))] customer::Phone),
}
