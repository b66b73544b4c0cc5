//! [`Command`] for issuing a new [`Invoice`].

use common::{
    operations::{By, Insert, Select},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{booking, invoice, text::Url, Booking, Invoice},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for issuing a new [`Invoice`] of a [`Booking`].
#[derive(Clone, Debug)]
pub struct CreateInvoice {
    /// ID of the [`Booking`] to issue the [`Invoice`] for.
    pub booking_id: booking::Id,

    /// Tax added on top of the [`Booking`] total, zero by default.
    pub tax: Option<Money>,

    /// Discount taken off the [`Booking`] total, zero by default.
    pub discount: Option<Money>,

    /// [`Url`] of the rendered document.
    pub pdf_url: Option<Url>,
}

impl<Db> Command<CreateInvoice> for Service<Db>
where
    Db: Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<Insert<Invoice>, Err = Traced<database::Error>>,
{
    type Ok = Invoice;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateInvoice,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateInvoice {
            booking_id,
            tax,
            discount,
            pdf_url,
        } = cmd;

        if tax.iter().chain(&discount).any(Money::is_negative) {
            return Err(tracerr::new!(E::NegativeAdjustment));
        }

        let booking = self
            .database()
            .execute(Select(By::<Option<Booking>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BookingNotExists(booking_id))
            .map_err(tracerr::wrap!())?;

        let zero = Money::zero(booking.total_amount.currency);
        let amounts = invoice::Amounts::new(
            &booking,
            tax.unwrap_or(zero),
            discount.unwrap_or(zero),
        )
        .ok_or(E::CurrencyMismatch)
        .map_err(tracerr::wrap!())?;

        let created_at = DateTime::now().coerce();
        let invoice = Invoice {
            id: invoice::Id::new(),
            booking_id,
            number: invoice::Number::generate(created_at),
            amounts,
            status: invoice::Status::Generated,
            pdf_url,
            created_at,
        };

        self.database()
            .execute(Insert(invoice.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(invoice)
    }
}

/// Error of [`CreateInvoice`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Booking`] doesn't exist.
    #[display("`Booking(id: {_0})` does not exist")]
    #[from(ignore)]
    BookingNotExists(#[error(not(source))] booking::Id),

    /// Tax or discount is negative.
    #[display("Tax and discount must not be negative")]
    #[from(ignore)]
    NegativeAdjustment,

    /// Tax or discount is in a currency other than the [`Booking`] one.
    #[display("Tax or discount currency differs from the `Booking` one")]
    #[from(ignore)]
    CurrencyMismatch,
}
