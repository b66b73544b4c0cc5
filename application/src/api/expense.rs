//! [`Expense`]-related definitions.

use common::{Date, DateTime, Money};
use derive_more::{Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use uuid::Uuid;

use crate::{api::scalar, define_error, AsError, Context, Error};

/// Operational expense of the property.
#[derive(Clone, Debug, From)]
pub struct Expense(domain::Expense);

impl Expense {
    /// Loads the [`Expense`] with the provided ID.
    ///
    /// # Errors
    ///
    /// Errors if the [`Expense`] doesn't exist.
    pub(crate) async fn load(
        ctx: &Context,
        id: domain::expense::Id,
    ) -> Result<Self, Error> {
        ctx.service()
            .execute(query::expense::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .map(Self)
            .ok_or_else(|| ExpenseError::NotExists.into())
            .map_err(ctx.error())
    }
}

/// Operational expense of the property.
#[graphql_object(context = Context)]
impl Expense {
    /// Unique identifier of this `Expense`.
    #[must_use]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// What was paid for.
    #[must_use]
    pub fn description(&self) -> scalar::Description {
        self.0.description.clone().into()
    }

    /// Spent amount.
    #[must_use]
    pub fn amount(&self) -> Money {
        self.0.amount
    }

    /// Category of this `Expense`.
    #[must_use]
    pub fn category(&self) -> Category {
        self.0.category.into()
    }

    /// `Date` this `Expense` is accounted on.
    #[must_use]
    pub fn date(&self) -> Date {
        self.0.date
    }

    /// `DateTime` when this `Expense` was recorded.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of an `Expense`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::expense::Id)]
#[into(domain::expense::Id)]
#[graphql(name = "ExpenseId", transparent)]
pub struct Id(Uuid);

define_enum! {
    #[doc = "Category of an `Expense`."]
    #[graphql(name = "ExpenseCategory")]
    enum Category = domain::expense::Category {
        #[doc = "Repairs and upkeep."]
        Maintenance,
        #[doc = "Electricity, water and similar bills."]
        Utilities,
        #[doc = "Cleaning services."]
        Cleaning,
        #[doc = "Consumables and supplies."]
        Supplies,
        #[doc = "Anything else."]
        Other,
    }
}

define_error! {
    enum ExpenseError {
        #[code = "EXPENSE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Expense` with the specified ID does not exist"]
        NotExists,
    }
}

pub mod list {
    //! Definitions related to [`Expense`] lists.
    //!
    //! [`Expense`]: super::Expense

    use service::{query, read::expense::list as read};

    use super::Expense;

    define_list!(
        node = Expense,
        total = query::expenses::TotalCount,
        names = (
            "ExpenseListCursor",
            "ExpenseListEdge",
            "ExpenseListConnection",
            "ExpenseListPageInfo",
        ),
    );
}
