//! [`Invoice`]-related definitions.

use common::{DateTime, Money};
use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use uuid::Uuid;

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// Invoice issued for a `Booking`.
#[derive(Clone, Debug, From)]
pub struct Invoice(domain::Invoice);

impl Invoice {
    /// Loads the [`Invoice`] with the provided ID.
    ///
    /// # Errors
    ///
    /// Errors if the [`Invoice`] doesn't exist.
    pub(crate) async fn load(
        ctx: &Context,
        id: domain::invoice::Id,
    ) -> Result<Self, Error> {
        ctx.service()
            .execute(query::invoice::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .map(Self)
            .ok_or_else(|| InvoiceError::NotExists.into())
            .map_err(ctx.error())
    }
}

/// Invoice issued for a `Booking`.
#[graphql_object(context = Context)]
impl Invoice {
    /// Unique identifier of this `Invoice`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Human-readable number of this `Invoice`, like
    /// `INV-0001735689600000`.
    #[must_use]
    pub fn number(&self) -> String {
        self.0.number.to_string()
    }

    /// `Booking` this `Invoice` is issued for.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Invoice.booking",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn booking(&self, ctx: &Context) -> Result<api::Booking, Error> {
        api::Booking::load(ctx, self.0.booking_id).await
    }

    /// Total amount of the `Booking`.
    #[must_use]
    pub fn total_amount(&self) -> Money {
        self.0.amounts.total
    }

    /// Tax added on top of the total amount.
    #[must_use]
    pub fn tax_amount(&self) -> Money {
        self.0.amounts.tax
    }

    /// Discount subtracted from the total amount.
    #[must_use]
    pub fn discount_amount(&self) -> Money {
        self.0.amounts.discount
    }

    /// Amount to be paid, never negative.
    #[must_use]
    pub fn final_amount(&self) -> Money {
        self.0.amounts.r#final
    }

    /// Status of this `Invoice`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// URL of the rendered PDF document.
    #[must_use]
    pub fn pdf_url(&self) -> Option<scalar::Url> {
        self.0.pdf_url.clone().map(Into::into)
    }

    /// `DateTime` when this `Invoice` was issued.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of an `Invoice`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::invoice::Id)]
#[into(domain::invoice::Id)]
#[graphql(name = "InvoiceId", transparent)]
pub struct Id(Uuid);

define_enum! {
    #[doc = "Status of an `Invoice`."]
    #[graphql(name = "InvoiceStatus")]
    enum Status = domain::invoice::Status {
        #[doc = "`Invoice` is issued."]
        Generated,
        #[doc = "`Invoice` is sent to the `Customer`."]
        Sent,
        #[doc = "`Invoice` is paid."]
        Paid,
        #[doc = "`Invoice` is voided."]
        Cancelled,
    }
}

define_error! {
    enum InvoiceError {
        #[code = "INVOICE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Invoice` with the specified ID does not exist"]
        NotExists,
    }
}

pub mod list {
    //! Definitions related to [`Invoice`] lists.
    //!
    //! [`Invoice`]: super::Invoice

    use service::{query, read::invoice::list as read};

    use super::Invoice;

    define_list!(
        node = Invoice,
        total = query::invoices::TotalCount,
        names = (
            "InvoiceListCursor",
            "InvoiceListEdge",
            "InvoiceListConnection",
            "InvoiceListPageInfo",
        ),
    );
}
