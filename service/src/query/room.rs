//! [`Query`] collection related to a single [`Room`].

use common::operations::By;

use crate::domain::{room, Room};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Room`] by its [`room::Id`].
pub type ById = DatabaseQuery<By<Option<Room>, room::Id>>;

/// Queries a [`Room`] by its [`room::Number`].
pub type ByNumber<'n> = DatabaseQuery<By<Option<Room>, &'n room::Number>>;

/// Queries [`room::Configuration`]s matching a filter.
pub type Configurations = DatabaseQuery<
    By<Vec<room::Configuration>, crate::read::room::configuration::Filter>,
>;

/// Queries a [`room::Configuration`] by its ID.
pub type ConfigurationById = DatabaseQuery<
    By<Option<room::Configuration>, room::configuration::Id>,
>;
