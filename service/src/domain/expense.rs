//! [`Expense`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf, Money};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use uuid::Uuid;

use crate::domain::text::Description;

/// Money spent on running the property.
#[derive(Clone, Debug)]
pub struct Expense {
    /// ID of this [`Expense`].
    pub id: Id,

    /// [`Description`] of this [`Expense`].
    pub description: Description,

    /// Spent amount.
    pub amount: Money,

    /// [`Category`] of this [`Expense`].
    pub category: Category,

    /// [`Date`] this [`Expense`] was made on.
    pub date: Date,

    /// [`DateTime`] when this [`Expense`] was recorded.
    pub created_at: CreationDateTime,
}

/// ID of an [`Expense`].
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

define_kind! {
    #[doc = "Category of an [`Expense`]."]
    enum Category {
        #[doc = "Repairs and upkeep."]
        Maintenance = 1,

        #[doc = "Electricity, water and similar bills."]
        Utilities = 2,

        #[doc = "Cleaning services."]
        Cleaning = 3,

        #[doc = "Consumables and supplies."]
        Supplies = 4,

        #[doc = "Anything else."]
        Other = 5,
    }
}

/// [`DateTime`] when an [`Expense`] was recorded.
pub type CreationDateTime = DateTimeOf<(Expense, unit::Creation)>;
