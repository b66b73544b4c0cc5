//! [`Configuration`] read model definition.
//!
//! [`Configuration`]: crate::domain::room::Configuration

use crate::domain::room::{self, configuration::PersonCount};
#[cfg(doc)]
use crate::domain::{room::Configuration, Room};

/// Filter of [`Configuration`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Filter {
    /// ID of the [`Room`] the [`Configuration`]s belong to.
    pub room_id: Option<room::Id>,

    /// [`PersonCount`] the [`Configuration`]s apply to.
    pub person_count: Option<PersonCount>,

    /// Availability flag the [`Configuration`]s should have.
    pub is_available: Option<bool>,
}

impl Filter {
    /// Creates a [`Filter`] of all the [`Configuration`]s of the specified
    /// [`Room`].
    #[must_use]
    pub fn room(room_id: room::Id) -> Self {
        Self {
            room_id: Some(room_id),
            ..Self::default()
        }
    }
}
