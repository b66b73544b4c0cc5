//! [`Command`] for updating an [`Expense`].

use common::{
    operations::{By, Select, Update},
    Date, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{expense, text::Description, Expense},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an [`Expense`].
///
/// [`None`] fields are left untouched.
#[derive(Clone, Debug, Default)]
pub struct UpdateExpense {
    /// ID of the [`Expense`] to update.
    pub expense_id: expense::Id,

    /// New [`Description`] of the [`Expense`].
    pub description: Option<Description>,

    /// New spent amount.
    pub amount: Option<Money>,

    /// New [`expense::Category`] of the [`Expense`].
    pub category: Option<expense::Category>,

    /// New [`Date`] the [`Expense`] was made on.
    pub date: Option<Date>,
}

impl<Db> Command<UpdateExpense> for Service<Db>
where
    Db: Database<
            Select<By<Option<Expense>, expense::Id>>,
            Ok = Option<Expense>,
            Err = Traced<database::Error>,
        > + Database<Update<Expense>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Expense;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateExpense,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateExpense {
            expense_id,
            description,
            amount,
            category,
            date,
        } = cmd;

        if let Some(amount) = &amount {
            if !amount.is_positive() {
                return Err(tracerr::new!(E::NonPositiveAmount));
            }
            if !self.accepts([amount]) {
                return Err(tracerr::new!(E::CurrencyMismatch));
            }
        }

        let mut expense = self
            .database()
            .execute(Select(By::<Option<Expense>, _>::new(expense_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ExpenseNotExists(expense_id))
            .map_err(tracerr::wrap!())?;

        if let Some(description) = description {
            expense.description = description;
        }
        if let Some(amount) = amount {
            expense.amount = amount;
        }
        if let Some(category) = category {
            expense.category = category;
        }
        if let Some(date) = date {
            expense.date = date;
        }

        self.database()
            .execute(Update(expense.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(expense)
    }
}

/// Error of [`UpdateExpense`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Expense`] doesn't exist.
    #[display("`Expense(id: {_0})` does not exist")]
    #[from(ignore)]
    ExpenseNotExists(#[error(not(source))] expense::Id),

    /// Spent amount is zero or negative.
    #[display("Spent amount must be positive")]
    #[from(ignore)]
    NonPositiveAmount,

    /// Spent amount is in a currency other than the property one.
    #[display("Spent currency differs from the property one")]
    #[from(ignore)]
    CurrencyMismatch,
}
