//! [`Query`] collection related to a single booking [`Request`].

use common::operations::By;

use crate::domain::booking::{request, Request};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Request`] by its [`request::Id`].
pub type ById = DatabaseQuery<By<Option<Request>, request::Id>>;
