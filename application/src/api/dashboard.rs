//! Staff dashboard definitions.

use common::{Date, Money, Percent};
use derive_more::From;
use juniper::graphql_object;
use service::{query::dashboard, read};

use crate::{api, Context};

/// Converts the provided counter into a GraphQL `Int`.
fn int(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// Numbers of `Room`s in the property.
#[derive(Clone, Copy, Debug, From)]
pub struct RoomStats(read::room::Stats);

/// Numbers of `Room`s in the property.
#[graphql_object(context = Context)]
impl RoomStats {
    /// Total number of `Room`s.
    #[must_use]
    pub fn total(&self) -> i32 {
        int(self.0.total)
    }

    /// Number of `Room`s flagged as available.
    #[must_use]
    pub fn available(&self) -> i32 {
        int(self.0.available)
    }

    /// Number of `Room`s not flagged as available.
    #[must_use]
    pub fn occupied(&self) -> i32 {
        int(self.0.occupied())
    }
}

/// Overview of a single day of the property.
#[derive(Clone, Debug, From)]
pub struct TodaySummary(dashboard::summary::Summary);

/// Overview of a single day of the property.
#[graphql_object(context = Context)]
impl TodaySummary {
    /// Summarized `Date`.
    #[must_use]
    pub fn date(&self) -> Date {
        self.0.date
    }

    /// Total number of `Customer`s.
    #[must_use]
    pub fn total_customers(&self) -> i32 {
        int(self.0.total_customers)
    }

    /// Numbers of `Room`s.
    #[must_use]
    pub fn rooms(&self) -> RoomStats {
        self.0.rooms.into()
    }

    /// Share of `Room`s not flagged as available.
    #[must_use]
    pub fn occupancy_rate(&self) -> Percent {
        self.0.occupancy_rate
    }

    /// Number of `Booking`s checking in or out on the `date`.
    #[must_use]
    pub fn todays_bookings(&self) -> i32 {
        int(self.0.todays_bookings)
    }

    /// `Booking`s checking in on the `date`.
    #[must_use]
    pub fn check_ins(&self) -> Vec<Row> {
        self.0.check_ins.iter().cloned().map(Into::into).collect()
    }

    /// `Booking`s checking out on the `date`.
    #[must_use]
    pub fn check_outs(&self) -> Vec<Row> {
        self.0.check_outs.iter().cloned().map(Into::into).collect()
    }

    /// `Booking`s with an outstanding balance.
    #[must_use]
    pub fn pending_dues(&self) -> Vec<Due> {
        self.0.pending_dues.iter().cloned().map(Into::into).collect()
    }

    /// Total amount of the `Booking`s checking in on the `date`.
    #[must_use]
    pub fn revenue(&self) -> Money {
        self.0.revenue
    }

    /// Total amount of all the `Booking`s ever made.
    #[must_use]
    pub fn total_revenue(&self) -> Money {
        self.0.total_revenue
    }
}

/// `Booking` listed on the dashboard along with its display labels.
#[derive(Clone, Debug, From)]
pub struct Row(dashboard::summary::Row);

/// `Booking` listed on the dashboard along with its display labels.
#[graphql_object(context = Context, name = "DashboardRow")]
impl Row {
    /// Listed `Booking`.
    #[must_use]
    pub fn booking(&self) -> api::Booking {
        self.0.booking.clone().into()
    }

    /// Name of the `Customer`, or a placeholder if they're unknown.
    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.0.customer_name
    }

    /// Number of the `Room`, or a placeholder if it's unknown.
    #[must_use]
    pub fn room_number(&self) -> &str {
        &self.0.room_number
    }
}

/// `Booking` with an outstanding balance.
#[derive(Clone, Debug, From)]
pub struct Due(dashboard::summary::Due);

/// `Booking` with an outstanding balance.
#[graphql_object(context = Context, name = "DashboardDue")]
impl Due {
    /// Listed `Booking` along with its display labels.
    #[must_use]
    pub fn row(&self) -> Row {
        self.0.row.clone().into()
    }

    /// Total amount to be paid.
    #[must_use]
    pub fn total(&self) -> Money {
        self.0.reconciliation.total
    }

    /// Amount paid so far.
    #[must_use]
    pub fn paid(&self) -> Money {
        self.0.reconciliation.paid
    }

    /// Amount still due.
    #[must_use]
    pub fn due(&self) -> Money {
        self.0.reconciliation.due
    }
}

/// Occupancy of the property `Room`s on a single day.
#[derive(Clone, Debug, From)]
pub struct RoomOccupancy(dashboard::occupancy::Occupancy);

/// Occupancy of the property `Room`s on a single day.
#[graphql_object(context = Context)]
impl RoomOccupancy {
    /// Numbers of `Room`s.
    #[must_use]
    pub fn stats(&self) -> RoomStats {
        self.0.stats.into()
    }

    /// Share of `Room`s not flagged as available.
    #[must_use]
    pub fn rate(&self) -> Percent {
        self.0.rate
    }

    /// Every `Room` along with the `Booking` occupying it.
    #[must_use]
    pub fn rooms(&self) -> Vec<Entry> {
        self.0.rooms.iter().cloned().map(Into::into).collect()
    }
}

/// `Room` along with the `Booking` occupying it.
#[derive(Clone, Debug, From)]
pub struct Entry(dashboard::occupancy::Entry);

/// `Room` along with the `Booking` occupying it.
#[graphql_object(context = Context, name = "RoomOccupancyEntry")]
impl Entry {
    /// Listed `Room`.
    #[must_use]
    pub fn room(&self) -> api::Room {
        self.0.room.clone().into()
    }

    /// `Booking` occupying the `Room` on the day, if any.
    #[must_use]
    pub fn booking(&self) -> Option<api::Booking> {
        self.0.booking.clone().map(Into::into)
    }
}
