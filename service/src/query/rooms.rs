//! [`Query`] collection related to the multiple [`Room`]s.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        availability,
        booking::{stay, Stay},
        Booking, Room,
    },
    infra::{database, Database},
    read, Query, Service,
};

use super::DatabaseQuery;

/// Queries a list of [`Room`]s.
pub type List =
    DatabaseQuery<By<read::room::list::Page, read::room::list::Selector>>;

/// Queries total count of [`Room`] list items.
pub type TotalCount = DatabaseQuery<
    By<read::room::list::TotalCount, read::room::list::Filter>,
>;

/// Queries [`read::room::Stats`] of the property.
pub type Stats = DatabaseQuery<By<read::room::Stats, ()>>;

/// [`Query`] for the [`Room`]s free for a [`Stay`].
///
/// Only [`Room`]s flagged as available are considered.
#[derive(Clone, Copy, Debug)]
pub struct Available {
    /// Check-in [`DateTime`].
    ///
    /// [`DateTime`]: common::DateTime
    pub check_in: stay::CheckInDateTime,

    /// Check-out [`DateTime`].
    ///
    /// [`DateTime`]: common::DateTime
    pub check_out: stay::CheckOutDateTime,
}

impl<Db> Query<Available> for Service<Db>
where
    Db: Database<
            Select<By<Vec<Room>, read::room::list::Filter>>,
            Ok = Vec<Room>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<Booking>, read::booking::Occupying>>,
            Ok = Vec<Booking>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Vec<Room>;
    type Err = Traced<AvailableError>;

    async fn execute(
        &self,
        Available {
            check_in,
            check_out,
        }: Available,
    ) -> Result<Self::Ok, Self::Err> {
        use AvailableError as E;

        let stay = Stay::new(check_in, check_out)
            .map_err(|_| E::InvalidInterval)
            .map_err(tracerr::wrap!())?;

        let rooms = self
            .database()
            .execute(Select(By::<Vec<Room>, _>::new(read::room::list::Filter {
                is_available: Some(true),
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let occupying = self
            .database()
            .execute(Select(By::<Vec<Booking>, _>::new(
                read::booking::Occupying {
                    room_id: None,
                    during: Some(stay),
                },
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(rooms
            .into_iter()
            .filter(|r| availability::is_available(r.id, &stay, &occupying))
            .collect())
    }
}

/// Error of [`Available`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum AvailableError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Check-out doesn't go after check-in.
    #[display("Check-out must go strictly after check-in")]
    #[from(ignore)]
    InvalidInterval,
}
