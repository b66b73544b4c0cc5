//! [`Query`] collection related to the multiple [`Expense`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Expense, Query};

use super::DatabaseQuery;

/// Queries a list of [`Expense`]s.
pub type List = DatabaseQuery<
    By<read::expense::list::Page, read::expense::list::Selector>,
>;

/// Queries total count of [`Expense`] list items.
pub type TotalCount = DatabaseQuery<
    By<read::expense::list::TotalCount, read::expense::list::Filter>,
>;
