//! [`Command`] definition.

pub mod approve_booking_request;
pub mod authorize_session;
pub mod create_booking;
pub mod create_booking_request;
pub mod create_customer;
pub mod create_expense;
pub mod create_invoice;
pub mod create_payment;
pub mod create_room;
pub mod create_room_configuration;
pub mod create_session;
pub mod create_user;
pub mod delete_booking;
pub mod delete_booking_request;
pub mod delete_customer;
pub mod delete_expense;
pub mod delete_invoice;
pub mod delete_payment;
pub mod delete_room;
pub mod delete_room_configuration;
pub mod register_customer;
pub mod reject_booking_request;
pub mod update_booking;
pub mod update_booking_request;
pub mod update_customer;
pub mod update_expense;
pub mod update_invoice;
pub mod update_payment;
pub mod update_room;
pub mod update_room_configuration;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    approve_booking_request::ApproveBookingRequest,
    authorize_session::AuthorizeSession, create_booking::CreateBooking,
    create_booking_request::CreateBookingRequest,
    create_customer::CreateCustomer, create_expense::CreateExpense,
    create_invoice::CreateInvoice, create_payment::CreatePayment,
    create_room::CreateRoom,
    create_room_configuration::CreateRoomConfiguration,
    create_session::CreateSession, create_user::CreateUser,
    delete_booking::DeleteBooking,
    delete_booking_request::DeleteBookingRequest,
    delete_customer::DeleteCustomer, delete_expense::DeleteExpense,
    delete_invoice::DeleteInvoice, delete_payment::DeletePayment,
    delete_room::DeleteRoom,
    delete_room_configuration::DeleteRoomConfiguration,
    register_customer::RegisterCustomer,
    reject_booking_request::RejectBookingRequest,
    update_booking::UpdateBooking,
    update_booking_request::UpdateBookingRequest,
    update_customer::UpdateCustomer, update_expense::UpdateExpense,
    update_invoice::UpdateInvoice, update_payment::UpdatePayment,
    update_room::UpdateRoom,
    update_room_configuration::UpdateRoomConfiguration,
};
