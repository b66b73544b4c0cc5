//! [`Request`] read model definition.
//!
//! [`Request`]: crate::domain::booking::Request

pub mod list {
    //! [`Request`]s list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::{booking::request, customer, room};
    #[cfg(doc)]
    use crate::domain::{booking::Request, Customer, Room};

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = request::Id;

    /// Cursor pointing to a specific [`Request`] in a list.
    pub type Cursor = request::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Debug, Default)]
    pub struct Filter {
        /// [`request::Status`] of the [`Request`]s.
        pub status: Option<request::Status>,

        /// ID of the requested [`Room`].
        pub room_id: Option<room::Id>,

        /// [`customer::Phone`] of the requesting [`Customer`].
        pub customer_phone: Option<customer::Phone>,
    }

    /// Total count of [`Request`]s.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
