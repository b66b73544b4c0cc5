//! [`Configuration`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Money};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Room;
use crate::domain::{room, text::Description};

/// Pricing tier of a [`Room`] for a specific number of occupants.
///
/// At most one [`Configuration`] exists per [`Room`] and [`PersonCount`].
#[derive(Clone, Debug)]
pub struct Configuration {
    /// ID of this [`Configuration`].
    pub id: Id,

    /// ID of the [`Room`] this [`Configuration`] prices.
    pub room_id: room::Id,

    /// Number of occupants this [`Configuration`] applies to.
    pub person_count: PersonCount,

    /// Cost of a single day.
    pub daily_cost: Money,

    /// Cost of a 30-day month.
    pub monthly_cost: Money,

    /// Indicator whether this [`Configuration`] is offered for bookings.
    pub is_available: bool,

    /// [`Description`] of this [`Configuration`].
    pub description: Option<Description>,

    /// [`DateTime`] when this [`Configuration`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Configuration`] was last modified.
    pub updated_at: ModificationDateTime,
}

/// ID of a [`Configuration`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, FromStr, Hash, Into, PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Number of people occupying a [`Room`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PersonCount(u8);

impl PersonCount {
    /// Maximum number of people a single [`Room`] may host.
    pub const MAX: u8 = 16;

    /// Single occupant.
    pub const ONE: Self = Self(1);

    /// Creates a new [`PersonCount`] if the given `count` is within
    /// `1..=`[`PersonCount::MAX`].
    #[must_use]
    pub fn new(count: impl TryInto<u8>) -> Option<Self> {
        let count = count.try_into().ok()?;
        (1..=Self::MAX).contains(&count).then_some(Self(count))
    }

    /// Returns the number of people.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl FromStr for PersonCount {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `PersonCount`")
    }
}

/// [`DateTime`] when a [`Configuration`] was created.
pub type CreationDateTime = DateTimeOf<(Configuration, unit::Creation)>;

/// [`DateTime`] when a [`Configuration`] was last modified.
pub type ModificationDateTime =
    DateTimeOf<(Configuration, unit::Modification)>;
