//! [`Command`] for recording a new [`Payment`].

use common::{
    operations::{By, Insert, Select},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        booking,
        payment::{self, PaymentDateTime, TransactionId},
        text::Url,
        Booking, Payment,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for recording a new [`Payment`] of a [`Booking`].
#[derive(Clone, Debug)]
pub struct CreatePayment {
    /// ID of the [`Booking`] the [`Payment`] is made for.
    pub booking_id: booking::Id,

    /// Paid amount.
    pub amount: Money,

    /// [`payment::Method`] the [`Payment`] was made by.
    pub method: payment::Method,

    /// [`payment::Status`] of the [`Payment`],
    /// [`payment::Status::Completed`] by default.
    pub status: Option<payment::Status>,

    /// [`Url`] of the screenshot proving the [`Payment`].
    pub screenshot_url: Option<Url>,

    /// [`TransactionId`] of the [`Payment`] in an external system.
    pub transaction_id: Option<TransactionId>,

    /// [`DateTime`] the [`Payment`] was made at, now by default.
    pub paid_at: Option<PaymentDateTime>,
}

impl<Db> Command<CreatePayment> for Service<Db>
where
    Db: Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<Insert<Payment>, Err = Traced<database::Error>>,
{
    type Ok = Payment;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreatePayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreatePayment {
            booking_id,
            amount,
            method,
            status,
            screenshot_url,
            transaction_id,
            paid_at,
        } = cmd;

        if !amount.is_positive() {
            return Err(tracerr::new!(E::NonPositiveAmount));
        }

        let booking = self
            .database()
            .execute(Select(By::<Option<Booking>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BookingNotExists(booking_id))
            .map_err(tracerr::wrap!())?;
        if amount.currency != booking.total_amount.currency {
            return Err(tracerr::new!(E::CurrencyMismatch));
        }

        let now = DateTime::now();
        let payment = Payment {
            id: payment::Id::new(),
            booking_id,
            amount,
            method,
            status: status.unwrap_or(payment::Status::Completed),
            screenshot_url,
            transaction_id,
            paid_at: paid_at.unwrap_or_else(|| now.coerce()),
            created_at: now.coerce(),
        };

        self.database()
            .execute(Insert(payment.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(payment)
    }
}

/// Error of [`CreatePayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Booking`] doesn't exist.
    #[display("`Booking(id: {_0})` does not exist")]
    #[from(ignore)]
    BookingNotExists(#[error(not(source))] booking::Id),

    /// Paid amount is zero or negative.
    #[display("Paid amount must be positive")]
    #[from(ignore)]
    NonPositiveAmount,

    /// Paid amount is in a currency other than the [`Booking`] one.
    #[display("Paid currency differs from the `Booking` one")]
    #[from(ignore)]
    CurrencyMismatch,
}
