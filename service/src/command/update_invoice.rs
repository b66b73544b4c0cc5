//! [`Command`] for updating an [`Invoice`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{invoice, text::Url, Invoice},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an [`Invoice`].
///
/// Amounts of an [`Invoice`] never change once it's issued.
#[derive(Clone, Debug, Default)]
pub struct UpdateInvoice {
    /// ID of the [`Invoice`] to update.
    pub invoice_id: invoice::Id,

    /// New [`invoice::Status`] of the [`Invoice`].
    pub status: Option<invoice::Status>,

    /// New [`Url`] of the rendered document, or its removal.
    pub pdf_url: Option<Option<Url>>,
}

impl<Db> Command<UpdateInvoice> for Service<Db>
where
    Db: Database<
            Select<By<Option<Invoice>, invoice::Id>>,
            Ok = Option<Invoice>,
            Err = Traced<database::Error>,
        > + Database<Update<Invoice>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Invoice;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateInvoice,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateInvoice {
            invoice_id,
            status,
            pdf_url,
        } = cmd;

        let mut invoice = self
            .database()
            .execute(Select(By::<Option<Invoice>, _>::new(invoice_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::InvoiceNotExists(invoice_id))
            .map_err(tracerr::wrap!())?;

        if let Some(status) = status {
            invoice.status = status;
        }
        if let Some(url) = pdf_url {
            invoice.pdf_url = url;
        }

        self.database()
            .execute(Update(invoice.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(invoice)
    }
}

/// Error of [`UpdateInvoice`] [`Command`] execution.
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
