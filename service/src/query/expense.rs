//! [`Query`] collection related to a single [`Expense`].

use common::operations::By;

use crate::domain::{expense, Expense};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries an [`Expense`] by its [`expense::Id`].
pub type ById = DatabaseQuery<By<Option<Expense>, expense::Id>>;
