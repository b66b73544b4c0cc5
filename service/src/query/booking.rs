//! [`Query`] collection related to a single [`Booking`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{booking, payment, Booking, Payment},
    infra::{database, Database},
    Query, Service,
};

use super::DatabaseQuery;

/// Queries a [`Booking`] by its [`booking::Id`].
pub type ById = DatabaseQuery<By<Option<Booking>, booking::Id>>;

/// [`Query`] reconciling [`Payment`]s of a [`Booking`] against its total.
#[derive(Clone, Copy, Debug, From)]
pub struct Reconciliation {
    /// ID of the [`Booking`] to reconcile.
    pub booking_id: booking::Id,
}

/// Output of the [`Reconciliation`] [`Query`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Reconciled [`Booking`].
    pub booking: Booking,

    /// Paid and due amounts of the [`Booking`].
    pub reconciliation: payment::Reconciliation,

    /// All the [`Payment`]s recorded for the [`Booking`].
    pub payments: Vec<Payment>,
}

impl<Db> Query<Reconciliation> for Service<Db>
where
    Db: Database<
            Select<By<Option<Booking>, booking::Id>>,
            Ok = Option<Booking>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Payment>, booking::Id>>,
            Ok = Vec<Payment>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<ReconciliationError>;

    async fn execute(
        &self,
        Reconciliation { booking_id }: Reconciliation,
    ) -> Result<Self::Ok, Self::Err> {
        use ReconciliationError as E;

        let booking = self
            .database()
            .execute(Select(By::<Option<Booking>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::BookingNotExists(booking_id))
            .map_err(tracerr::wrap!())?;
        let payments = self
            .database()
            .execute(Select(By::<Vec<Payment>, _>::new(booking_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Output {
            reconciliation: payment::Reconciliation::new(&booking, &payments),
            booking,
            payments,
        })
    }
}

/// Error of [`Reconciliation`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ReconciliationError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Booking`] doesn't exist.
    #[display("`Booking(id: {_0})` does not exist")]
    #[from(ignore)]
    BookingNotExists(#[error(not(source))] booking::Id),
}
