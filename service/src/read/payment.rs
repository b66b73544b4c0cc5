//! [`Payment`] read model definition.
//!
//! [`Payment`]: crate::domain::Payment

pub mod list {
    //! [`Payment`]s list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::{booking, payment};
    #[cfg(doc)]
    use crate::domain::{Booking, Payment};

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = payment::Id;

    /// Cursor pointing to a specific [`Payment`] in a list.
    pub type Cursor = payment::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// ID of the [`Booking`] the [`Payment`]s are made for.
        pub booking_id: Option<booking::Id>,

        /// [`payment::Status`] of the [`Payment`]s.
        pub status: Option<payment::Status>,
    }

    /// Total count of [`Payment`]s.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
