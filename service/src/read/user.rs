//! [`User`] read model definition.
//!
//! [`User`]: crate::domain::User

use derive_more::{From, Into};

#[cfg(doc)]
use crate::domain::User;

/// Total count of staff [`User`]s.
#[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
pub struct TotalCount(i32);
