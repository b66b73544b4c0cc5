//! [`Booking`] definitions.

pub mod request;
pub mod stay;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Customer, Room};
use crate::domain::{
    cost::Charges, customer, room, room::configuration::PersonCount,
    text::Remarks,
};

pub use self::{
    request::Request,
    stay::{InvalidInterval, Stay},
};

/// Reservation of a [`Room`] by a [`Customer`] for a [`Stay`].
#[derive(Clone, Debug)]
pub struct Booking {
    /// ID of this [`Booking`].
    pub id: Id,

    /// [`customer::Phone`] of the [`Customer`] this [`Booking`] is made for.
    pub customer_phone: customer::Phone,

    /// ID of the booked [`Room`].
    pub room_id: room::Id,

    /// Number of people staying.
    pub number_of_people: PersonCount,

    /// [`Stay`] this [`Booking`] occupies the [`Room`] for.
    pub stay: Stay,

    /// [`DurationType`] this [`Booking`] is billed by.
    pub duration: DurationType,

    /// [`Status`] of this [`Booking`].
    pub status: Status,

    /// [`PaymentStatus`] of this [`Booking`].
    ///
    /// Set manually and never derived from the recorded payments.
    pub payment_status: PaymentStatus,

    /// [`Charges`] this [`Booking`] was priced with.
    pub charges: Charges,

    /// Total amount of this [`Booking`] computed out of its [`Charges`].
    pub total_amount: Money,

    /// Staff [`Remarks`] about this [`Booking`].
    pub remarks: Option<Remarks>,

    /// [`DateTime`] when this [`Booking`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Booking`] was last modified.
    pub updated_at: ModificationDateTime,
}

impl Booking {
    /// Indicates whether this [`Booking`] blocks its [`Room`] for its
    /// [`Stay`].
    #[must_use]
    pub fn is_occupying(&self) -> bool {
        self.status.is_occupying()
    }
}

/// ID of a [`Booking`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
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

define_kind! {
    #[doc = "Billing granularity of a [`Booking`]."]
    enum DurationType {
        #[doc = "Billed per calendar day."]
        Daily = 1,

        #[doc = "Billed per whole week at the daily rate."]
        Weekly = 2,

        #[doc = "Billed per started 30-day month."]
        Monthly = 3,
    }
}

define_kind! {
    #[doc = "Lifecycle status of a [`Booking`]."]
    enum Status {
        #[doc = "[`Booking`] awaiting confirmation."]
        Pending = 1,

        #[doc = "[`Booking`] confirmed and awaiting check-in."]
        Confirmed = 2,

        #[doc = "Guest has checked in."]
        CheckedIn = 3,

        #[doc = "Guest has checked out."]
        CheckedOut = 4,

        #[doc = "[`Booking`] was cancelled."]
        Cancelled = 5,

        #[doc = "Guest didn't show up for check-in."]
        NoShow = 6,

        #[doc = "[`Booking`] was completed."]
        Completed = 7,
    }
}

impl Status {
    /// Indicates whether a [`Booking`] in this [`Status`] blocks its
    /// [`Room`].
    #[must_use]
    pub const fn is_occupying(self) -> bool {
        matches!(self, Self::Confirmed | Self::CheckedIn)
    }

    /// Indicates whether this [`Status`] allows no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::CheckedOut | Self::Completed | Self::Cancelled | Self::NoShow,
        )
    }

    /// Indicates whether a [`Booking`] may move from this [`Status`] into the
    /// `next` one.
    ///
    /// Staying in the same [`Status`] is always allowed.
    #[must_use]
    pub const fn can_become(self, next: Self) -> bool {
        use Status as S;

        if self as u8 == next as u8 {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        match (self, next) {
            (S::Pending, S::Confirmed)
            | (S::Confirmed, S::CheckedIn)
            | (S::CheckedIn, S::CheckedOut | S::Completed)
            | (
                S::Pending | S::Confirmed | S::CheckedIn,
                S::Cancelled | S::NoShow,
            ) => true,
            (
                S::Pending
                | S::Confirmed
                | S::CheckedIn
                | S::CheckedOut
                | S::Cancelled
                | S::NoShow
                | S::Completed,
                _,
            ) => false,
        }
    }
}

define_kind! {
    #[doc = "Payment status of a [`Booking`]."]
    enum PaymentStatus {
        #[doc = "Nothing is paid yet."]
        Pending = 1,

        #[doc = "Paid partially."]
        Partial = 2,

        #[doc = "Paid in full."]
        Paid = 3,

        #[doc = "Payments were returned."]
        Refunded = 4,
    }
}

/// [`DateTime`] when a [`Booking`] was created.
pub type CreationDateTime = DateTimeOf<(Booking, unit::Creation)>;

/// [`DateTime`] when a [`Booking`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Booking, unit::Modification)>;

#[cfg(test)]
mod spec {
    use super::Status as S;

    #[test]
    fn occupying_statuses() {
        let occupying = S::ALL
            .iter()
            .copied()
            .filter(|s| s.is_occupying())
            .collect::<Vec<_>>();
        assert_eq!(occupying, [S::Confirmed, S::CheckedIn]);
    }

    #[test]
    fn forward_transitions() {
        assert!(S::Pending.can_become(S::Confirmed));
        assert!(S::Confirmed.can_become(S::CheckedIn));
        assert!(S::CheckedIn.can_become(S::CheckedOut));
        assert!(S::CheckedIn.can_become(S::Completed));

        assert!(!S::Pending.can_become(S::CheckedIn));
        assert!(!S::Confirmed.can_become(S::Pending));
        assert!(!S::CheckedIn.can_become(S::Confirmed));
    }

    #[test]
    fn cancellation_only_before_checkout() {
        for from in [S::Pending, S::Confirmed, S::CheckedIn] {
            assert!(from.can_become(S::Cancelled), "{from}");
            assert!(from.can_become(S::NoShow), "{from}");
        }
        for from in [S::CheckedOut, S::Completed] {
            assert!(!from.can_become(S::Cancelled), "{from}");
            assert!(!from.can_become(S::NoShow), "{from}");
        }
    }

    #[test]
    fn terminal_statuses_are_final() {
        for from in S::ALL.iter().copied().filter(|s| s.is_terminal()) {
            for &to in S::ALL {
                assert_eq!(from.can_become(to), from == to, "{from} -> {to}");
            }
        }
    }
}
