//! [`Expense`] read model definition.
//!
//! [`Expense`]: crate::domain::Expense

pub mod list {
    //! [`Expense`]s list definitions.

    use common::define_pagination;
    use derive_more::{From, Into};

    use crate::domain::expense;
    #[cfg(doc)]
    use crate::domain::Expense;

    define_pagination!(Cursor, Node, Filter);

    /// Node in a [`Connection`].
    pub type Node = expense::Id;

    /// Cursor pointing to a specific [`Expense`] in a list.
    pub type Cursor = expense::Id;

    /// Filter for [`Selector`].
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// [`expense::Category`] of the [`Expense`]s.
        pub category: Option<expense::Category>,
    }

    /// Total count of [`Expense`]s.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}
