//! [`Payment`]-related definitions.

use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use uuid::Uuid;

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// Payment made towards a `Booking`.
#[derive(Clone, Debug, From)]
pub struct Payment(domain::Payment);

impl Payment {
    /// Loads the [`Payment`] with the provided ID.
    ///
    /// # Errors
    ///
    /// Errors if the [`Payment`] doesn't exist.
    pub(crate) async fn load(
        ctx: &Context,
        id: domain::payment::Id,
    ) -> Result<Self, Error> {
        ctx.service()
            .execute(query::payment::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .map(Self)
            .ok_or_else(|| PaymentError::NotExists.into())
            .map_err(ctx.error())
    }
}

/// Payment made towards a `Booking`.
#[graphql_object(context = Context)]
impl Payment {
    /// Unique identifier of this `Payment`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Payment.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `Booking` this `Payment` is made for.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Payment.booking",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn booking(&self, ctx: &Context) -> Result<api::Booking, Error> {
        api::Booking::load(ctx, self.0.booking_id).await
    }

    /// Paid amount.
    #[must_use]
    pub fn amount(&self) -> Money {
        self.0.amount
    }

    /// Method this `Payment` is made by.
    #[must_use]
    pub fn method(&self) -> Method {
        self.0.method.into()
    }

    /// Status of this `Payment`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// URL of the payment proof screenshot.
    #[must_use]
    pub fn screenshot_url(&self) -> Option<scalar::Url> {
        self.0.screenshot_url.clone().map(Into::into)
    }

    /// External transaction identifier.
    #[must_use]
    pub fn transaction_id(&self) -> Option<TransactionId> {
        self.0.transaction_id.clone().map(Into::into)
    }

    /// `DateTime` when this `Payment` was made.
    #[must_use]
    pub fn paid_at(&self) -> DateTime {
        self.0.paid_at.coerce()
    }

    /// `DateTime` when this `Payment` was recorded.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `Payment`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::payment::Id)]
#[into(domain::payment::Id)]
#[graphql(name = "PaymentId", transparent)]
pub struct Id(Uuid);

/// External transaction identifier of a `Payment`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "TransactionId",
    with = scalar::Via::<domain::payment::TransactionId>,
)]
pub struct TransactionId(domain::payment::TransactionId);

define_enum! {
    #[doc = "Method a `Payment` is made by."]
    #[graphql(name = "PaymentMethod")]
    enum Method = domain::payment::Method {
        #[doc = "Cash in hand."]
        Cash,
        #[doc = "Online payment gateway."]
        Online,
        #[doc = "Unified Payments Interface transfer."]
        Upi,
        #[doc = "Debit or credit card."]
        Card,
        #[doc = "Direct bank transfer."]
        BankTransfer,
    }
}

define_enum! {
    #[doc = "Status of a `Payment`."]
    #[graphql(name = "PaymentStatus")]
    enum Status = domain::payment::Status {
        #[doc = "`Payment` awaits confirmation."]
        Pending,
        #[doc = "`Payment` is received."]
        Completed,
        #[doc = "`Payment` has failed."]
        Failed,
        #[doc = "`Payment` was returned."]
        Refunded,
    }
}

define_error! {
    enum PaymentError {
        #[code = "PAYMENT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Payment` with the specified ID does not exist"]
        NotExists,
    }
}

pub mod list {
    //! Definitions related to [`Payment`] lists.
    //!
    //! [`Payment`]: super::Payment

    use service::{query, read::payment::list as read};

    use super::Payment;

    define_list!(
        node = Payment,
        total = query::payments::TotalCount,
        names = (
            "PaymentListCursor",
            "PaymentListEdge",
            "PaymentListConnection",
            "PaymentListPageInfo",
        ),
    );
}
