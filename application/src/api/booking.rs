//! [`Booking`]-related definitions.

use common::{DateTime, Money};
use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use uuid::Uuid;

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// Reservation of a `Room` by a `Customer` for a `Stay`.
#[derive(Clone, Debug, From)]
pub struct Booking(domain::Booking);

impl Booking {
    /// Loads the [`Booking`] with the provided ID.
    ///
    /// # Errors
    ///
    /// Errors if the [`Booking`] doesn't exist.
    pub(crate) async fn load(
        ctx: &Context,
        id: domain::booking::Id,
    ) -> Result<Self, Error> {
        ctx.service()
            .execute(query::booking::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .map(Self)
            .ok_or_else(|| BookingError::NotExists.into())
            .map_err(ctx.error())
    }

    /// Returns the underlying [`domain::Booking`].
    #[must_use]
    pub(crate) const fn domain(&self) -> &domain::Booking {
        &self.0
    }
}

/// Reservation of a `Room` by a `Customer` for a stay.
#[graphql_object(context = Context)]
impl Booking {
    /// Unique identifier of this `Booking`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `Customer` this `Booking` is made for.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.customer",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn customer(
        &self,
        ctx: &Context,
    ) -> Result<api::Customer, Error> {
        api::Customer::load(ctx, self.0.customer_phone.clone()).await
    }

    /// Phone number of the `Customer` this `Booking` is made for.
    #[must_use]
    pub fn customer_phone(&self) -> api::customer::Phone {
        self.0.customer_phone.clone().into()
    }

    /// Booked `Room`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.room",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn room(&self, ctx: &Context) -> Result<api::Room, Error> {
        api::Room::load(ctx, self.0.room_id).await
    }

    /// Number of people staying.
    #[must_use]
    pub fn number_of_people(&self) -> scalar::PersonCount {
        self.0.number_of_people.into()
    }

    /// `DateTime` of the check-in.
    #[must_use]
    pub fn check_in(&self) -> DateTime {
        self.0.stay.check_in().coerce()
    }

    /// `DateTime` of the check-out.
    #[must_use]
    pub fn check_out(&self) -> DateTime {
        self.0.stay.check_out().coerce()
    }

    /// Billing granularity of this `Booking`.
    #[must_use]
    pub fn duration_type(&self) -> DurationType {
        self.0.duration.into()
    }

    /// Lifecycle status of this `Booking`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// Payment status of this `Booking`.
    #[must_use]
    pub fn payment_status(&self) -> PaymentStatus {
        self.0.payment_status.into()
    }

    /// Daily rate this `Booking` was priced with.
    #[must_use]
    pub fn daily_cost(&self) -> Option<Money> {
        self.0.charges.daily_cost
    }

    /// Monthly rate this `Booking` was priced with.
    #[must_use]
    pub fn monthly_cost(&self) -> Option<Money> {
        self.0.charges.monthly_cost
    }

    /// Surcharge for an early check-in.
    #[must_use]
    pub fn early_check_in_cost(&self) -> Option<Money> {
        self.0.charges.early_check_in_cost
    }

    /// Surcharge for a late check-out.
    #[must_use]
    pub fn late_check_out_cost(&self) -> Option<Money> {
        self.0.charges.late_check_out_cost
    }

    /// Total amount to be paid for this `Booking`.
    #[must_use]
    pub fn total_amount(&self) -> Money {
        self.0.total_amount
    }

    /// Remarks about this `Booking`.
    #[must_use]
    pub fn remarks(&self) -> Option<scalar::Remarks> {
        self.0.remarks.clone().map(Into::into)
    }

    /// Payments made for this `Booking` along with the outstanding balance.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Booking.reconciliation",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn reconciliation(
        &self,
        ctx: &Context,
    ) -> Result<Reconciliation, Error> {
        Reconciliation::load(ctx, self.0.id).await
    }

    /// `DateTime` when this `Booking` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Booking` was last modified.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Unique identifier of a `Booking`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::booking::Id)]
#[into(domain::booking::Id)]
#[graphql(name = "BookingId", transparent)]
pub struct Id(Uuid);

define_enum! {
    #[doc = "Billing granularity of a `Booking`."]
    #[graphql(name = "DurationType")]
    enum DurationType = domain::booking::DurationType {
        #[doc = "Billed per calendar day."]
        Daily,
        #[doc = "Billed per whole week at the daily rate."]
        Weekly,
        #[doc = "Billed per started 30-day month."]
        Monthly,
    }
}

define_enum! {
    #[doc = "Lifecycle status of a `Booking`."]
    #[graphql(name = "BookingStatus")]
    enum Status = domain::booking::Status {
        #[doc = "`Booking` awaiting confirmation."]
        Pending,
        #[doc = "`Booking` confirmed and awaiting check-in."]
        Confirmed,
        #[doc = "Guest has checked in."]
        CheckedIn,
        #[doc = "Guest has checked out."]
        CheckedOut,
        #[doc = "`Booking` was cancelled."]
        Cancelled,
        #[doc = "Guest didn't show up for check-in."]
        NoShow,
        #[doc = "`Booking` was completed."]
        Completed,
    }
}

define_enum! {
    #[doc = "Payment status of a `Booking`."]
    #[graphql(name = "BookingPaymentStatus")]
    enum PaymentStatus = domain::booking::PaymentStatus {
        #[doc = "Nothing is paid yet."]
        Pending,
        #[doc = "Paid partially."]
        Partial,
        #[doc = "Paid in full."]
        Paid,
        #[doc = "Payments were returned."]
        Refunded,
    }
}

/// Outstanding balance of a [`Booking`].
#[derive(Clone, Debug, From)]
pub struct Reconciliation(query::booking::Output);

impl Reconciliation {
    /// Loads the [`Reconciliation`] of the [`Booking`] with the provided ID.
    ///
    /// # Errors
    ///
    /// Errors if the [`Booking`] doesn't exist.
    pub(crate) async fn load(
        ctx: &Context,
        booking_id: domain::booking::Id,
    ) -> Result<Self, Error> {
        ctx.service()
            .execute(query::booking::Reconciliation { booking_id })
            .await
            .map(Self)
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Returns the reconciled [`domain::Booking`].
    #[must_use]
    pub(crate) const fn reconciled(&self) -> &domain::Booking {
        &self.0.booking
    }
}

/// Payments made for a `Booking` along with its outstanding balance.
#[graphql_object(context = Context, name = "BookingReconciliation")]
impl Reconciliation {
    /// Reconciled `Booking`.
    #[must_use]
    pub fn booking(&self) -> Booking {
        self.0.booking.clone().into()
    }

    /// Total amount to be paid for the `Booking`.
    #[must_use]
    pub fn total(&self) -> Money {
        self.0.reconciliation.total
    }

    /// Amount paid so far.
    #[must_use]
    pub fn paid(&self) -> Money {
        self.0.reconciliation.paid
    }

    /// Amount still due.
    ///
    /// Negative if the `Booking` is overpaid.
    #[must_use]
    pub fn due(&self) -> Money {
        self.0.reconciliation.due
    }

    /// Indicator whether anything is still due.
    #[must_use]
    pub fn is_due(&self) -> bool {
        self.0.reconciliation.is_due()
    }

    /// `Payment`s made for the `Booking`.
    #[must_use]
    pub fn payments(&self) -> Vec<api::Payment> {
        self.0.payments.iter().cloned().map(Into::into).collect()
    }
}

impl AsError for query::booking::ReconciliationError {
    fn try_as_error(&self) -> Option<Error> {
        use query::booking::ReconciliationError as E;

        match self {
            Self::Db(e) => e.try_as_error(),
            E::BookingNotExists(_) => Some(BookingError::NotExists.into()),
        }
    }
}

define_error! {
    enum BookingError {
        #[code = "BOOKING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Booking` with the specified ID does not exist"]
        NotExists,
    }
}

pub mod list {
    //! Definitions related to [`Booking`] lists.
    //!
    //! [`Booking`]: super::Booking

    use service::{query, read::booking::list as read};

    use super::Booking;

    define_list!(
        node = Booking,
        total = query::bookings::TotalCount,
        names = (
            "BookingListCursor",
            "BookingListEdge",
            "BookingListConnection",
            "BookingListPageInfo",
        ),
    );
}
