//! [`Query`] collection related to the multiple [`Invoice`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::Invoice, Query};

use super::DatabaseQuery;

/// Queries a list of [`Invoice`]s.
pub type List = DatabaseQuery<
    By<read::invoice::list::Page, read::invoice::list::Selector>,
>;

/// Queries total count of [`Invoice`] list items.
pub type TotalCount = DatabaseQuery<
    By<read::invoice::list::TotalCount, read::invoice::list::Filter>,
>;
