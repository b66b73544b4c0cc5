//! [`Query`] collection related to the multiple [`Payment`]s.

use common::operations::By;

use crate::{
    domain::{booking, Payment},
    read,
};
#[cfg(doc)]
use crate::{domain::Booking, Query};

use super::DatabaseQuery;

/// Queries a list of [`Payment`]s.
pub type List = DatabaseQuery<
    By<read::payment::list::Page, read::payment::list::Selector>,
>;

/// Queries total count of [`Payment`] list items.
pub type TotalCount = DatabaseQuery<
    By<read::payment::list::TotalCount, read::payment::list::Filter>,
>;

/// Queries all the [`Payment`]s of a [`Booking`].
pub type ByBooking = DatabaseQuery<By<Vec<Payment>, booking::Id>>;
