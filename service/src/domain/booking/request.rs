//! Booking [`Request`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Booking, Customer, Room};
use crate::domain::{
    booking::{self, DurationType, Stay},
    cost::Charges,
    customer, room,
    room::configuration::PersonCount,
    text::Remarks,
};

/// Provisional [`Booking`] proposal awaiting staff approval.
#[derive(Clone, Debug)]
pub struct Request {
    /// ID of this [`Request`].
    pub id: Id,

    /// Name of the [`Customer`] requesting.
    pub customer_name: customer::Name,

    /// [`customer::Phone`] of the [`Customer`] requesting.
    pub customer_phone: customer::Phone,

    /// ID of the requested [`Room`].
    pub room_id: room::Id,

    /// Number of people going to stay.
    pub number_of_people: PersonCount,

    /// Requested [`Stay`].
    pub stay: Stay,

    /// [`DurationType`] the [`Booking`] is going to be billed by.
    pub duration: DurationType,

    /// [`Charges`] this [`Request`] was priced with.
    pub charges: Charges,

    /// Total amount computed out of the [`Charges`].
    pub total_amount: Money,

    /// [`Status`] of this [`Request`].
    pub status: Status,

    /// [`Remarks`] about this [`Request`].
    pub remarks: Option<Remarks>,

    /// [`RejectionReason`] of this [`Request`], if it was rejected.
    pub rejection_reason: Option<RejectionReason>,

    /// ID of the [`Booking`] this [`Request`] was approved into.
    pub booking_id: Option<booking::Id>,

    /// [`DateTime`] when this [`Request`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Request`] was last modified.
    pub updated_at: ModificationDateTime,
}

impl Request {
    /// Indicates whether this [`Request`] still awaits a decision.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.status, Status::Pending)
    }
}

/// ID of a [`Request`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, FromStr, Hash, Into, PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Reason a [`Request`] was rejected with.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(forward)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct RejectionReason(String);

impl RejectionReason {
    /// [`RejectionReason`] of a [`Request`] whose [`Room`] got occupied.
    #[must_use]
    pub fn room_unavailable() -> Self {
        Self("Room is not available for the requested dates".into())
    }

    /// Creates a new [`RejectionReason`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `reason` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    /// Creates a new [`RejectionReason`] if the given `reason` is valid.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Option<Self> {
        let reason = reason.into();
        Self::check(&reason).then_some(Self(reason))
    }

    /// Checks whether the given `reason` is a valid [`RejectionReason`].
    fn check(reason: impl AsRef<str>) -> bool {
        let reason = reason.as_ref();
        reason.trim() == reason
            && !reason.is_empty()
            && reason.chars().count() <= 500
    }
}

impl FromStr for RejectionReason {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `RejectionReason`")
    }
}

define_kind! {
    #[doc = "Status of a booking [`Request`]."]
    enum Status {
        #[doc = "[`Request`] awaits a decision."]
        Pending = 1,

        #[doc = "[`Request`] was approved into a [`Booking`]."]
        Approved = 2,

        #[doc = "[`Request`] was rejected."]
        Rejected = 3,
    }
}

/// [`DateTime`] when a [`Request`] was created.
pub type CreationDateTime = DateTimeOf<(Request, unit::Creation)>;

/// [`DateTime`] when a [`Request`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Request, unit::Modification)>;
