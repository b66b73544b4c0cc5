//! [`BookingRequest`]-related definitions.

use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{command, domain, domain::booking::request, query, Query as _};
use uuid::Uuid;

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// Request of a `Customer` to book a `Room`, awaiting a staff decision.
#[derive(Clone, Debug, From)]
pub struct BookingRequest(domain::booking::Request);

impl BookingRequest {
    /// Loads the [`BookingRequest`] with the provided ID.
    ///
    /// # Errors
    ///
    /// Errors if the [`BookingRequest`] doesn't exist.
    pub(crate) async fn load(
        ctx: &Context,
        id: request::Id,
    ) -> Result<Self, Error> {
        ctx.service()
            .execute(query::booking_request::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .map(Self)
            .ok_or_else(|| BookingRequestError::NotExists.into())
            .map_err(ctx.error())
    }

    /// Returns the underlying [`domain::booking::Request`].
    #[must_use]
    pub(crate) const fn domain(&self) -> &domain::booking::Request {
        &self.0
    }
}

/// Request of a `Customer` to book a `Room`, awaiting a staff decision.
#[graphql_object(context = Context)]
impl BookingRequest {
    /// Unique identifier of this `BookingRequest`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "BookingRequest.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of the requesting `Customer`.
    #[must_use]
    pub fn customer_name(&self) -> api::customer::Name {
        self.0.customer_name.clone().into()
    }

    /// Phone number of the requesting `Customer`.
    #[must_use]
    pub fn customer_phone(&self) -> api::customer::Phone {
        self.0.customer_phone.clone().into()
    }

    /// Requesting `Customer`, if they are known to the property already.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "BookingRequest.customer",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn customer(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Customer>, Error> {
        ctx.service()
            .execute(query::customer::ByPhone::by(&self.0.customer_phone))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|c| c.map(Into::into))
    }

    /// Requested `Room`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "BookingRequest.room",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn room(&self, ctx: &Context) -> Result<api::Room, Error> {
        api::Room::load(ctx, self.0.room_id).await
    }

    /// Number of people to stay.
    #[must_use]
    pub fn number_of_people(&self) -> scalar::PersonCount {
        self.0.number_of_people.into()
    }

    /// Requested `DateTime` of the check-in.
    #[must_use]
    pub fn check_in(&self) -> DateTime {
        self.0.stay.check_in().coerce()
    }

    /// Requested `DateTime` of the check-out.
    #[must_use]
    pub fn check_out(&self) -> DateTime {
        self.0.stay.check_out().coerce()
    }

    /// Requested billing granularity.
    #[must_use]
    pub fn duration_type(&self) -> api::booking::DurationType {
        self.0.duration.into()
    }

    /// Daily rate this `BookingRequest` was priced with.
    #[must_use]
    pub fn daily_cost(&self) -> Option<Money> {
        self.0.charges.daily_cost
    }

    /// Monthly rate this `BookingRequest` was priced with.
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

    /// Total amount the requested stay costs.
    #[must_use]
    pub fn total_amount(&self) -> Money {
        self.0.total_amount
    }

    /// Status of this `BookingRequest`.
    #[must_use]
    pub fn status(&self) -> Status {
        self.0.status.into()
    }

    /// Remarks of the requesting `Customer`.
    #[must_use]
    pub fn remarks(&self) -> Option<scalar::Remarks> {
        self.0.remarks.clone().map(Into::into)
    }

    /// Reason this `BookingRequest` was rejected for.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        self.0.rejection_reason.clone().map(Into::into)
    }

    /// `Booking` this `BookingRequest` was turned into, once approved.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "BookingRequest.booking",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn booking(
        &self,
        ctx: &Context,
    ) -> Result<Option<api::Booking>, Error> {
        match self.0.booking_id {
            Some(id) => api::Booking::load(ctx, id).await.map(Some),
            None => Ok(None),
        }
    }

    /// `DateTime` when this `BookingRequest` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `BookingRequest` was last modified.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Unique identifier of a `BookingRequest`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(request::Id)]
#[into(request::Id)]
#[graphql(name = "BookingRequestId", transparent)]
pub struct Id(Uuid);

/// Reason a `BookingRequest` was rejected for.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "RejectionReason",
    with = scalar::Via::<request::RejectionReason>,
)]
pub struct RejectionReason(request::RejectionReason);

define_enum! {
    #[doc = "Status of a `BookingRequest`."]
    #[graphql(name = "BookingRequestStatus")]
    enum Status = request::Status {
        #[doc = "`BookingRequest` awaits a decision."]
        Pending,
        #[doc = "`BookingRequest` was approved into a `Booking`."]
        Approved,
        #[doc = "`BookingRequest` was rejected."]
        Rejected,
    }
}

/// Outcome of a `BookingRequest` approval.
#[derive(Clone, Debug, From)]
pub struct Approval(command::approve_booking_request::Approval);

/// Outcome of a `BookingRequest` approval.
///
/// The `BookingRequest` is rejected instead if its `Room` got occupied
/// meanwhile.
#[graphql_object(context = Context, name = "BookingRequestApproval")]
impl Approval {
    /// Decided `BookingRequest`.
    #[must_use]
    pub fn request(&self) -> BookingRequest {
        self.0.request.clone().into()
    }

    /// `Booking` the `BookingRequest` was turned into, if it was approved.
    #[must_use]
    pub fn booking(&self) -> Option<api::Booking> {
        self.0.booking.clone().map(Into::into)
    }
}

define_error! {
    enum BookingRequestError {
        #[code = "BOOKING_REQUEST_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`BookingRequest` with the specified ID does not exist"]
        NotExists,
    }
}

pub mod list {
    //! Definitions related to [`BookingRequest`] lists.
    //!
    //! [`BookingRequest`]: super::BookingRequest

    use service::{query, read::booking::request::list as read};

    use super::BookingRequest;

    define_list!(
        node = BookingRequest,
        total = query::booking_requests::TotalCount,
        names = (
            "BookingRequestListCursor",
            "BookingRequestListEdge",
            "BookingRequestListConnection",
            "BookingRequestListPageInfo",
        ),
    );
}
