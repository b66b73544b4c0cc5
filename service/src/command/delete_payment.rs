//! [`Command`] for deleting a [`Payment`].

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{payment, Payment},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Payment`].
#[derive(Clone, Copy, Debug, From)]
pub struct DeletePayment {
    /// ID of the [`Payment`] to delete.
    pub payment_id: payment::Id,
}

impl<Db> Command<DeletePayment> for Service<Db>
where
    Db: Database<
            Select<By<Option<Payment>, payment::Id>>,
            Ok = Option<Payment>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Payment, payment::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = Payment;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeletePayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeletePayment { payment_id } = cmd;

        let payment = self
            .database()
            .execute(Select(By::<Option<Payment>, _>::new(payment_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PaymentNotExists(payment_id))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Delete(By::<Payment, _>::new(payment_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(payment)
    }
}

/// Error of [`DeletePayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Payment`] doesn't exist.
    #[display("`Payment(id: {_0})` does not exist")]
    #[from(ignore)]
    PaymentNotExists(#[error(not(source))] payment::Id),
}
