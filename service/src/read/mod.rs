//! Read entities definitions.

pub mod booking;
pub mod customer;
pub mod expense;
pub mod invoice;
pub mod payment;
pub mod room;
pub mod user;
