//! Dashboard [`Query`] definitions.
//!
//! [`Query`]: crate::Query

pub mod occupancy;
pub mod recent;
pub mod summary;

pub use self::{
    occupancy::RoomOccupancy, recent::RecentBookings, summary::TodaySummary,
};
