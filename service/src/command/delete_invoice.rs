//! [`Command`] for deleting an [`Invoice`].

use common::operations::{By, Delete, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{invoice, Invoice},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting an [`Invoice`].
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteInvoice {
    /// ID of the [`Invoice`] to delete.
    pub invoice_id: invoice::Id,
}

impl<Db> Command<DeleteInvoice> for Service<Db>
where
    Db: Database<
            Select<By<Option<Invoice>, invoice::Id>>,
            Ok = Option<Invoice>,
            Err = Traced<database::Error>,
        > + Database<
            Delete<By<Invoice, invoice::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        >,
{
    type Ok = Invoice;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteInvoice,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteInvoice { invoice_id } = cmd;

        let invoice = self
            .database()
            .execute(Select(By::<Option<Invoice>, _>::new(invoice_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::InvoiceNotExists(invoice_id))
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Delete(By::<Invoice, _>::new(invoice_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(invoice)
    }
}

/// Error of [`DeleteInvoice`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Invoice`] doesn't exist.
    #[display("`Invoice(id: {_0})` does not exist")]
    #[from(ignore)]
    InvoiceNotExists(#[error(not(source))] invoice::Id),
}
