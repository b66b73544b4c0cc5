//! [`Command`] for recording a new [`Expense`].

use common::{operations::Insert, Date, DateTime, Money};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{expense, text::Description, Expense},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for recording a new [`Expense`].
#[derive(Clone, Debug)]
pub struct CreateExpense {
    /// [`Description`] of a new [`Expense`].
    pub description: Description,

    /// Spent amount.
    pub amount: Money,

    /// [`expense::Category`] of a new [`Expense`].
    pub category: expense::Category,

    /// [`Date`] a new [`Expense`] was made on, today by default.
    pub date: Option<Date>,
}

impl<Db> Command<CreateExpense> for Service<Db>
where
    Db: Database<Insert<Expense>, Err = Traced<database::Error>>,
{
    type Ok = Expense;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateExpense,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateExpense {
            description,
            amount,
            category,
            date,
        } = cmd;

        if !amount.is_positive() {
            return Err(tracerr::new!(E::NonPositiveAmount));
        }
        if !self.accepts([&amount]) {
            return Err(tracerr::new!(E::CurrencyMismatch));
        }

        let expense = Expense {
            id: expense::Id::new(),
            description,
            amount,
            category,
            date: date.unwrap_or_else(Date::today),
            created_at: DateTime::now().coerce(),
        };

        self.database()
            .execute(Insert(expense.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(expense)
    }
}

/// Error of [`CreateExpense`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Spent amount is zero or negative.
    #[display("Spent amount must be positive")]
    #[from(ignore)]
    NonPositiveAmount,

    /// Spent amount is in a currency other than the property one.
    #[display("Spent currency differs from the property one")]
    #[from(ignore)]
    CurrencyMismatch,
}
