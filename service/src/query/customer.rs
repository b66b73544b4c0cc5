//! [`Query`] collection related to a single [`Customer`].

use common::operations::By;

use crate::domain::{customer, Customer};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Customer`] by their [`customer::Phone`].
pub type ByPhone<'p> = DatabaseQuery<By<Option<Customer>, &'p customer::Phone>>;
