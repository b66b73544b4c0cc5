//! Domain definitions.

pub mod availability;
pub mod booking;
pub mod cost;
pub mod credentials;
pub mod customer;
pub mod expense;
pub mod invoice;
pub mod payment;
pub mod room;
pub mod session;
pub mod text;
pub mod user;

pub use self::{
    booking::Booking, customer::Customer, expense::Expense, invoice::Invoice,
    payment::Payment, room::Room, session::Session, user::User,
};
