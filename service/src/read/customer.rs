//! [`Customer`] read model definition.
//!
//! [`Customer`]: crate::domain::Customer

use derive_more::Deref;

#[cfg(doc)]
use crate::domain::{booking::Request, Booking, Customer};

/// Indicator whether a [`Customer`] is referenced by any [`Booking`] or
/// [`Request`].
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct InUse(pub bool);

pub mod list {
    //! [`Customer`]s list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::customer;
    #[cfg(doc)]
    use crate::domain::Customer;

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = customer::Phone;

    /// Cursor pointing to a specific [`Customer`] in a list.
    pub type Cursor = customer::Phone;

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`customer::Name`] (or its part) to fuzzy search for.
        pub name: Option<customer::Name>,
    }

    /// Total count of [`Customer`]s.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
