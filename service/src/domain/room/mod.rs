//! [`Room`] definitions.

pub mod configuration;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use crate::domain::text::Description;

pub use self::configuration::Configuration;

/// Room of the property.
#[derive(Clone, Debug)]
pub struct Room {
    /// ID of this [`Room`].
    pub id: Id,

    /// [`Number`] of this [`Room`] unique across the property.
    pub number: Number,

    /// [`Bathroom`] kind of this [`Room`].
    pub bathroom: Bathroom,

    /// Indicator whether this [`Room`] is offered for bookings.
    ///
    /// Set by staff manually and not derived from bookings.
    pub is_available: bool,

    /// [`Description`] of this [`Room`].
    pub description: Option<Description>,

    /// Reference daily cost of this [`Room`].
    ///
    /// Applies only if this [`Room`] has no [`Configuration`]s.
    pub daily_cost: Option<Money>,

    /// Reference monthly cost of this [`Room`].
    ///
    /// Applies only if this [`Room`] has no [`Configuration`]s.
    pub monthly_cost: Option<Money>,

    /// [`DateTime`] when this [`Room`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Room`] was last modified.
    pub updated_at: ModificationDateTime,
}

/// ID of a [`Room`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
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

/// Number (label) of a [`Room`], like `201A`.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(forward)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Number(String);

impl Number {
    /// Creates a new [`Number`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `number` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Creates a new [`Number`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Number`].
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        number.trim() == number
            && !number.is_empty()
            && number.chars().count() <= 32
    }
}

impl FromStr for Number {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Number`")
    }
}

define_kind! {
    #[doc = "Kind of a [`Room`] bathroom."]
    enum Bathroom {
        #[doc = "Bathroom attached to the [`Room`]."]
        Attached = 1,

        #[doc = "Shared bathroom outside the [`Room`]."]
        NonAttached = 2,
    }
}

/// [`DateTime`] when a [`Room`] was created.
pub type CreationDateTime = DateTimeOf<(Room, unit::Creation)>;

/// [`DateTime`] when a [`Room`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Room, unit::Modification)>;
