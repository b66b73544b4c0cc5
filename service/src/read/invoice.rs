//! [`Invoice`] read model definition.
//!
//! [`Invoice`]: crate::domain::Invoice

pub mod list {
    //! [`Invoice`]s list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::{booking, invoice};
    #[cfg(doc)]
    use crate::domain::{Booking, Invoice};

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = invoice::Id;

    /// Cursor pointing to a specific [`Invoice`] in a list.
    pub type Cursor = invoice::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// ID of the [`Booking`] the [`Invoice`]s are issued for.
        pub booking_id: Option<booking::Id>,
    }

    /// Total count of [`Invoice`]s.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
