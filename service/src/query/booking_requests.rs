//! [`Query`] collection related to the multiple booking [`Request`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{domain::booking::Request, Query};

use super::DatabaseQuery;

/// Queries a list of [`Request`]s.
pub type List = DatabaseQuery<
    By<
        read::booking::request::list::Page,
        read::booking::request::list::Selector,
    >,
>;

/// Queries total count of [`Request`] list items.
pub type TotalCount = DatabaseQuery<
    By<
        read::booking::request::list::TotalCount,
        read::booking::request::list::Filter,
    >,
>;
