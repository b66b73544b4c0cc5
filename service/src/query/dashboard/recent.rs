//! [`RecentBookings`] definition.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::Booking,
    infra::{database, Database},
    read, Query, Service,
};

/// [`Query`] for the most recently created [`Booking`]s.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RecentBookings {
    /// Maximum number of [`Booking`]s to return.
    pub limit: u16,
}

impl RecentBookings {
    /// Number of [`Booking`]s shown on a dashboard.
    pub const DASHBOARD_LIMIT: u16 = 10;
}

impl Default for RecentBookings {
    fn default() -> Self {
        Self {
            limit: Self::DASHBOARD_LIMIT,
        }
    }
}

impl<Db> Query<RecentBookings> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Booking>, read::booking::Recent>>,
        Ok = Vec<Booking>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Booking>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        RecentBookings { limit }: RecentBookings,
    ) -> Result<Self::Ok, Self::Err> {
        self.database()
            .execute(Select(By::<Vec<Booking>, _>::new(read::booking::Recent(
                limit,
            ))))
            .await
            .map_err(tracerr::wrap!())
    }
}
