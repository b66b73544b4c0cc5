//! [`Booking`] read model definition.
//!
//! [`Booking`]: crate::domain::Booking

pub mod request;

use common::Date;
use derive_more::{Deref, From, Into};
use rust_decimal::Decimal;

use crate::domain::{booking::Stay, room};
#[cfg(doc)]
use crate::domain::{booking::Status, Booking, Room};

/// Selector of [`Booking`]s blocking their [`Room`]s.
///
/// Selects [`Booking`]s in an occupying [`Status`] only.
#[derive(Clone, Copy, Debug, Default)]
pub struct Occupying {
    /// ID of the [`Room`] to select [`Booking`]s of.
    pub room_id: Option<room::Id>,

    /// [`Stay`] the selected [`Booking`]s should overlap.
    pub during: Option<Stay>,
}

/// Selector of [`Booking`]s checking in or out on a [`Date`].
#[derive(Clone, Copy, Debug, Eq, From, PartialEq)]
pub struct Touching(pub Date);

/// Selector of [`Booking`]s having something left to pay.
///
/// Selects [`Booking`]s with a pending payment status and the ones whose
/// payments don't cover their total amount.
#[derive(Clone, Copy, Debug, Default)]
pub struct Outstanding;

/// Selector of the most recently created [`Booking`]s.
#[derive(Clone, Copy, Debug, Deref, Eq, PartialEq)]
pub struct Recent(pub u16);

/// Sum of [`Booking`] total amounts.
///
/// Selected by an optional [`Date`] of the check-in to sum over.
#[derive(Clone, Copy, Debug, Default, Deref, Eq, From, Into, PartialEq)]
pub struct Revenue(pub Decimal);

pub mod list {
    //! [`Booking`]s list definitions.

    use common::{define_pagination, Date};
    use derive_more::{From, Into};

    use crate::domain::{booking, customer, room};
    #[cfg(doc)]
    use crate::domain::{Booking, Customer, Room};

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = booking::Id;

    /// Cursor pointing to a specific [`Booking`] in a list.
    pub type Cursor = booking::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// ID of the booked [`Room`].
        pub room_id: Option<room::Id>,

        /// [`customer::Phone`] of the [`Customer`] the [`Booking`]s are made
        /// for.
        pub customer_phone: Option<customer::Phone>,

        /// [`booking::Status`] of the [`Booking`]s.
        pub status: Option<booking::Status>,

        /// [`booking::PaymentStatus`] of the [`Booking`]s.
        pub payment_status: Option<booking::PaymentStatus>,

        /// First [`Date`] of the check-in, inclusive.
        pub check_in_from: Option<Date>,

        /// Last [`Date`] of the check-in, inclusive.
        pub check_in_to: Option<Date>,
    }

    /// Total count of [`Booking`]s.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
