//! [`Room`] read model definition.
//!
//! [`Room`]: crate::domain::Room

pub mod configuration;

use derive_more::Deref;

#[cfg(doc)]
use crate::domain::{Booking, Room};

/// Indicator whether a [`Room`] is referenced by any [`Booking`].
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct InUse(pub bool);

/// Numbers of [`Room`]s in the property.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Stats {
    /// Total number of [`Room`]s.
    pub total: u32,

    /// Number of [`Room`]s flagged as available.
    pub available: u32,
}

impl Stats {
    /// Returns the number of [`Room`]s not flagged as available.
    #[must_use]
    pub const fn occupied(&self) -> u32 {
        self.total.saturating_sub(self.available)
    }
}

pub mod list {
    //! [`Room`]s list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::room;
    #[cfg(doc)]
    use crate::domain::Room;

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = room::Id;

    /// Cursor pointing to a specific [`Room`] in a list.
    pub type Cursor = room::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// Availability flag the [`Room`]s should have.
        pub is_available: Option<bool>,
    }

    /// Total count of [`Room`]s.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
