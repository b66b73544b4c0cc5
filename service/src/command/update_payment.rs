//! [`Command`] for updating a [`Payment`].

use common::{
    operations::{By, Select, Update},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Booking;
use crate::{
    domain::{
        payment::{self, PaymentDateTime, TransactionId},
        text::Url,
        Payment,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Payment`].
///
/// [`None`] fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct UpdatePayment {
    /// ID of the [`Payment`] to update.
    pub payment_id: payment::Id,

    /// New paid amount.
    pub amount: Option<Money>,

    /// New [`payment::Method`].
    pub method: Option<payment::Method>,

    /// New [`payment::Status`].
    pub status: Option<payment::Status>,

    /// New screenshot [`Url`], or its removal.
    pub screenshot_url: Option<Option<Url>>,

    /// New [`TransactionId`], or its removal.
    pub transaction_id: Option<Option<TransactionId>>,

    /// New [`DateTime`] the [`Payment`] was made at.
    ///
    /// [`DateTime`]: common::DateTime
    pub paid_at: Option<PaymentDateTime>,
}

impl<Db> Command<UpdatePayment> for Service<Db>
where
    Db: Database<
            Select<By<Option<Payment>, payment::Id>>,
            Ok = Option<Payment>,
            Err = Traced<database::Error>,
        > + Database<Update<Payment>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Payment;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdatePayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdatePayment {
            payment_id,
            amount,
            method,
            status,
            screenshot_url,
            transaction_id,
            paid_at,
        } = cmd;

        let mut payment = self
            .database()
            .execute(Select(By::<Option<Payment>, _>::new(payment_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PaymentNotExists(payment_id))
            .map_err(tracerr::wrap!())?;

        if let Some(amount) = amount {
            if !amount.is_positive() {
                return Err(tracerr::new!(E::NonPositiveAmount));
            }
            if amount.currency != payment.amount.currency {
                return Err(tracerr::new!(E::CurrencyMismatch));
            }
            payment.amount = amount;
        }
        if let Some(method) = method {
            payment.method = method;
        }
        if let Some(status) = status {
            payment.status = status;
        }
        if let Some(url) = screenshot_url {
            payment.screenshot_url = url;
        }
        if let Some(id) = transaction_id {
            payment.transaction_id = id;
        }
        if let Some(at) = paid_at {
            payment.paid_at = at;
        }

        self.database()
            .execute(Update(payment.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(payment)
    }
}

/// Error of [`UpdatePayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Payment`] doesn't exist.
    #[display("`Payment(id: {_0})` does not exist")]
    #[from(ignore)]
    PaymentNotExists(#[error(not(source))] payment::Id),

    /// Paid amount is zero or negative.
    #[display("Paid amount must be positive")]
    #[from(ignore)]
    NonPositiveAmount,

    /// Paid amount is in a currency other than the [`Booking`] one.
    #[display("Paid currency differs from the `Booking` one")]
    #[from(ignore)]
    CurrencyMismatch,
}
