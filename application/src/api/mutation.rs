//! GraphQL [`Mutation`]s definitions.

use common::{Date, DateTime, Money};
use juniper::{graphql_object, Nullable};
use service::{
    command,
    domain::{cost::Rates, session::Principal},
    query, Command as _,
};

use crate::{api, define_error, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

/// Converts the provided [`Nullable`] GraphQL argument into a patch of a
/// clearable field.
///
/// An omitted argument leaves the field untouched, while an explicit `null`
/// clears it.
fn patch<T, U: From<T>>(value: Nullable<T>) -> Option<Option<U>> {
    value.explicit().map(|v| v.map(Into::into))
}

/// Combines the provided cost overrides into [`Rates`], if any of them is
/// provided.
fn rates(
    daily_cost: Option<Money>,
    monthly_cost: Option<Money>,
) -> Option<Rates> {
    (daily_cost.is_some() || monthly_cost.is_some()).then_some(Rates {
        daily_cost,
        monthly_cost,
    })
}

/// Issues a new [`Session`] for the provided [`Principal`] and makes it the
/// current one.
async fn start_session(
    ctx: &Context,
    by: command::CreateSession,
) -> Result<api::user::session::CreateResult, Error> {
    let output = ctx
        .service()
        .execute(by)
        .await
        .map_err(AsError::into_error)
        .map_err(ctx.error())?;

    ctx.set_current_session(Session {
        principal: output.principal.clone(),
        token: output.token.clone(),
        expires_at: output.expires_at.coerce(),
    })
    .await;

    Ok(output.into())
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new staff `User` with the provided credentials.
    ///
    /// The very first `User` may be created without any `Session`, while the
    /// following ones require a staff one.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LOGIN_OCCUPIED` - provided `UserLogin` is occupied by another `User`;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createUser",
            login = %login,
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user(
        name: api::user::Name,
        login: api::user::Login,
        password: api::scalar::Password,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let total: i32 = ctx
            .service()
            .execute(query::user::TotalCount::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into();
        if total > 0 {
            _ = ctx.staff().await?;
        }

        let user = ctx
            .service()
            .execute(command::CreateUser {
                name: name.into(),
                login: login.into(),
                password: password.into_secret(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        start_session(
            ctx,
            command::CreateSession::ByPrincipal(Principal::Staff(user.id)),
        )
        .await
    }

    /// Creates a new staff `Session` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials does not match any `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createUserSession",
            login = %login,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_user_session(
        login: api::user::Login,
        password: api::scalar::Password,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        start_session(
            ctx,
            command::CreateSession::ByStaffCredentials {
                login: login.into(),
                password: password.into_secret(),
            },
        )
        .await
    }

    /// Creates a new `Customer` `Session` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials does not match any
    ///                         registered `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createCustomerSession",
            otel.name = Self::SPAN_NAME,
            phone = %phone,
        ),
    )]
    pub async fn create_customer_session(
        phone: api::customer::Phone,
        password: api::scalar::Password,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        start_session(
            ctx,
            command::CreateSession::ByCustomerCredentials {
                phone: phone.into(),
                password: password.into_secret(),
            },
        )
        .await
    }

    /// Registers a `Customer` with the provided password and signs them in.
    ///
    /// A `Customer` created by staff earlier gets the password set.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ALREADY_REGISTERED` - the `Customer` has a password already.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "registerCustomer",
            otel.name = Self::SPAN_NAME,
            phone = %phone,
        ),
    )]
    pub async fn register_customer(
        phone: api::customer::Phone,
        name: api::customer::Name,
        password: api::scalar::Password,
        email: Option<api::customer::Email>,
        ctx: &Context,
    ) -> Result<api::user::session::CreateResult, Error> {
        let customer = ctx
            .service()
            .execute(command::RegisterCustomer {
                phone: phone.into(),
                name: name.into(),
                email: email.map(Into::into),
                password: password.into_secret(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        start_session(
            ctx,
            command::CreateSession::ByPrincipal(Principal::Customer(
                customer.phone,
            )),
        )
        .await
    }

    /// Creates a new `Room`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ROOM_NUMBER_OCCUPIED` - another `Room` has the same `RoomNumber`;
    /// - `CURRENCY_MISMATCH` - costs are not in the property currency;
    /// - `NEGATIVE_COST` - a rate or surcharge is negative;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createRoom",
            number = %number,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_room(
        number: api::room::Number,
        bathroom: api::room::Bathroom,
        is_available: Option<bool>,
        description: Option<api::scalar::Description>,
        daily_cost: Option<Money>,
        monthly_cost: Option<Money>,
        ctx: &Context,
    ) -> Result<api::Room, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::CreateRoom {
                number: number.into(),
                bathroom: bathroom.into(),
                is_available: is_available.unwrap_or(true),
                description: description.map(Into::into),
                daily_cost,
                monthly_cost,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the provided fields of the `Room`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ROOM_NOT_EXISTS` - the `Room` with the specified ID does not exist;
    /// - `ROOM_NUMBER_OCCUPIED` - another `Room` has the same `RoomNumber`;
    /// - `CURRENCY_MISMATCH` - costs are not in the property currency;
    /// - `NEGATIVE_COST` - a rate or surcharge is negative;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateRoom",
            otel.name = Self::SPAN_NAME,
            room_id = %room_id,
        ),
    )]
    pub async fn update_room(
        room_id: api::room::Id,
        number: Option<api::room::Number>,
        bathroom: Option<api::room::Bathroom>,
        is_available: Option<bool>,
        description: Nullable<api::scalar::Description>,
        daily_cost: Nullable<Money>,
        monthly_cost: Nullable<Money>,
        ctx: &Context,
    ) -> Result<api::Room, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::UpdateRoom {
                room_id: room_id.into(),
                number: number.map(Into::into),
                bathroom: bathroom.map(Into::into),
                is_available,
                description: patch(description),
                daily_cost: daily_cost.explicit(),
                monthly_cost: monthly_cost.explicit(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Room` along with its `RoomConfiguration`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ROOM_NOT_EXISTS` - the `Room` with the specified ID does not exist;
    /// - `ROOM_IN_USE` - the `Room` is referenced by `Booking`s;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteRoom",
            otel.name = Self::SPAN_NAME,
            room_id = %room_id,
        ),
    )]
    pub async fn delete_room(
        room_id: api::room::Id,
        ctx: &Context,
    ) -> Result<api::Room, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::DeleteRoom {
                room_id: room_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `RoomConfiguration` pricing the `Room` for the provided
    /// number of people.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ROOM_NOT_EXISTS` - the `Room` with the specified ID does not exist;
    /// - `ROOM_CONFIGURATION_EXISTS` - the `Room` is priced for this number
    ///                                 of people already;
    /// - `CURRENCY_MISMATCH` - costs are not in the property currency;
    /// - `NEGATIVE_COST` - a rate or surcharge is negative;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createRoomConfiguration",
            otel.name = Self::SPAN_NAME,
            person_count = %person_count,
            room_id = %room_id,
        ),
    )]
    pub async fn create_room_configuration(
        room_id: api::room::Id,
        person_count: api::scalar::PersonCount,
        daily_cost: Money,
        monthly_cost: Money,
        is_available: Option<bool>,
        description: Option<api::scalar::Description>,
        ctx: &Context,
    ) -> Result<api::room::Configuration, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::CreateRoomConfiguration {
                room_id: room_id.into(),
                person_count: person_count.into(),
                daily_cost,
                monthly_cost,
                is_available: is_available.unwrap_or(true),
                description: description.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the provided fields of the `RoomConfiguration`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ROOM_CONFIGURATION_NOT_EXISTS` - the `RoomConfiguration` with the
    ///                                     specified ID does not exist;
    /// - `ROOM_CONFIGURATION_EXISTS` - the `Room` is priced for this number
    ///                                 of people already;
    /// - `CURRENCY_MISMATCH` - costs are not in the property currency;
    /// - `NEGATIVE_COST` - a rate or surcharge is negative;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            configuration_id = %configuration_id,
            gql.name = "updateRoomConfiguration",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_room_configuration(
        configuration_id: api::room::ConfigurationId,
        person_count: Option<api::scalar::PersonCount>,
        daily_cost: Option<Money>,
        monthly_cost: Option<Money>,
        is_available: Option<bool>,
        description: Nullable<api::scalar::Description>,
        ctx: &Context,
    ) -> Result<api::room::Configuration, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::UpdateRoomConfiguration {
                configuration_id: configuration_id.into(),
                person_count: person_count.map(Into::into),
                daily_cost,
                monthly_cost,
                is_available,
                description: patch(description),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `RoomConfiguration`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ROOM_CONFIGURATION_NOT_EXISTS` - the `RoomConfiguration` with the
    ///                                     specified ID does not exist;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            configuration_id = %configuration_id,
            gql.name = "deleteRoomConfiguration",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_room_configuration(
        configuration_id: api::room::ConfigurationId,
        ctx: &Context,
    ) -> Result<api::room::Configuration, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::DeleteRoomConfiguration {
                configuration_id: configuration_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Customer`, optionally without a password.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PHONE_OCCUPIED` - another `Customer` has the same `CustomerPhone`;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "createCustomer",
            otel.name = Self::SPAN_NAME,
            phone = %phone,
        ),
    )]
    pub async fn create_customer(
        phone: api::customer::Phone,
        name: api::customer::Name,
        email: Option<api::customer::Email>,
        password: Option<api::scalar::Password>,
        additional_phone: Option<api::customer::Phone>,
        documents_url: Option<api::scalar::Url>,
        photo_id_proof_url: Option<api::scalar::Url>,
        id_proof_urls: Option<Vec<api::scalar::Url>>,
        remarks: Option<api::scalar::Remarks>,
        ctx: &Context,
    ) -> Result<api::Customer, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::CreateCustomer {
                phone: phone.into(),
                name: name.into(),
                email: email.map(Into::into),
                password: password.map(api::scalar::Password::into_secret),
                additional_phone: additional_phone.map(Into::into),
                documents_url: documents_url.map(Into::into),
                photo_id_proof_url: photo_id_proof_url.map(Into::into),
                id_proof_urls: id_proof_urls
                    .into_iter()
                    .flatten()
                    .map(Into::into)
                    .collect(),
                remarks: remarks.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the provided fields of the `Customer`.
    ///
    /// A `Customer` may update only their own name, additional phone and
    /// remarks.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CUSTOMER_NOT_EXISTS` - the `Customer` with the specified phone does
    ///                           not exist;
    /// - `NOT_OWNER` - the `Customer` is another one;
    /// - `NOT_STAFF` - a `Customer` tries to update a staff-only field.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateCustomer",
            otel.name = Self::SPAN_NAME,
            phone = %phone,
        ),
    )]
    pub async fn update_customer(
        phone: api::customer::Phone,
        name: Option<api::customer::Name>,
        email: Nullable<api::customer::Email>,
        password: Option<api::scalar::Password>,
        additional_phone: Nullable<api::customer::Phone>,
        documents_url: Nullable<api::scalar::Url>,
        photo_id_proof_url: Nullable<api::scalar::Url>,
        id_proof_urls: Option<Vec<api::scalar::Url>>,
        remarks: Nullable<api::scalar::Remarks>,
        ctx: &Context,
    ) -> Result<api::Customer, Error> {
        let phone = phone.into();
        ctx.authorize_customer(&phone).await?;

        let cmd = command::UpdateCustomer {
            phone,
            name: name.map(Into::into),
            email: patch(email),
            password: password.map(api::scalar::Password::into_secret),
            additional_phone: patch(additional_phone),
            documents_url: patch(documents_url),
            photo_id_proof_url: patch(photo_id_proof_url),
            id_proof_urls: id_proof_urls
                .map(|urls| urls.into_iter().map(Into::into).collect()),
            remarks: patch(remarks),
        };

        let touches_staff_fields = cmd.email.is_some()
            || cmd.password.is_some()
            || cmd.documents_url.is_some()
            || cmd.photo_id_proof_url.is_some()
            || cmd.id_proof_urls.is_some();
        if touches_staff_fields {
            _ = ctx.staff().await?;
        }

        ctx.service()
            .execute(cmd)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Customer`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CUSTOMER_NOT_EXISTS` - the `Customer` with the specified phone does
    ///                           not exist;
    /// - `CUSTOMER_IN_USE` - the `Customer` is referenced by `Booking`s;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteCustomer",
            otel.name = Self::SPAN_NAME,
            phone = %phone,
        ),
    )]
    pub async fn delete_customer(
        phone: api::customer::Phone,
        ctx: &Context,
    ) -> Result<api::Customer, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::DeleteCustomer {
                phone: phone.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Books the `Room` for the `Customer` directly.
    ///
    /// The `dailyCost` and `monthlyCost` override the costs resolved from
    /// the `Room` pricing.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ROOM_NOT_EXISTS` - the `Room` with the specified ID does not exist;
    /// - `CUSTOMER_NOT_EXISTS` - the `Customer` with the specified phone does
    ///                           not exist;
    /// - `INVALID_INTERVAL` - `checkOut` doesn't go after `checkIn`;
    /// - `MISSING_CONFIGURATION` - the `Room` has no cost for this number of
    ///                             people;
    /// - `ROOM_UNAVAILABLE` - the `Room` is occupied for the stay;
    /// - `CURRENCY_MISMATCH` - costs are not in the property currency;
    /// - `NEGATIVE_COST` - a rate or surcharge is negative;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            check_in = ?check_in,
            check_out = ?check_out,
            customer_phone = %customer_phone,
            gql.name = "createBooking",
            otel.name = Self::SPAN_NAME,
            room_id = %room_id,
        ),
    )]
    pub async fn create_booking(
        customer_phone: api::customer::Phone,
        room_id: api::room::Id,
        number_of_people: api::scalar::PersonCount,
        check_in: DateTime,
        check_out: DateTime,
        duration_type: api::booking::DurationType,
        daily_cost: Option<Money>,
        monthly_cost: Option<Money>,
        early_check_in_cost: Option<Money>,
        late_check_out_cost: Option<Money>,
        status: Option<api::booking::Status>,
        payment_status: Option<api::booking::PaymentStatus>,
        remarks: Option<api::scalar::Remarks>,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::CreateBooking {
                customer_phone: customer_phone.into(),
                room_id: room_id.into(),
                number_of_people: number_of_people.into(),
                check_in: check_in.coerce(),
                check_out: check_out.coerce(),
                duration: duration_type.into(),
                rates: rates(daily_cost, monthly_cost),
                early_check_in_cost,
                late_check_out_cost,
                status: status.map(Into::into),
                payment_status: payment_status.map(Into::into),
                remarks: remarks.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the provided fields of the `Booking`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist;
    /// - `ROOM_NOT_EXISTS` - the `Room` with the specified ID does not exist;
    /// - `CUSTOMER_NOT_EXISTS` - the `Customer` with the specified phone does
    ///                           not exist;
    /// - `INVALID_INTERVAL` - `checkOut` doesn't go after `checkIn`;
    /// - `INVALID_TRANSITION` - the `Booking` cannot move to the `status`;
    /// - `MISSING_CONFIGURATION` - the `Room` has no cost for this number of
    ///                             people;
    /// - `ROOM_UNAVAILABLE` - the `Room` is occupied for the stay;
    /// - `CURRENCY_MISMATCH` - costs are not in the property currency;
    /// - `NEGATIVE_COST` - a rate or surcharge is negative;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            booking_id = %booking_id,
            gql.name = "updateBooking",
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn update_booking(
        booking_id: api::booking::Id,
        customer_phone: Option<api::customer::Phone>,
        room_id: Option<api::room::Id>,
        number_of_people: Option<api::scalar::PersonCount>,
        check_in: Option<DateTime>,
        check_out: Option<DateTime>,
        duration_type: Option<api::booking::DurationType>,
        daily_cost: Option<Money>,
        monthly_cost: Option<Money>,
        early_check_in_cost: Nullable<Money>,
        late_check_out_cost: Nullable<Money>,
        status: Option<api::booking::Status>,
        payment_status: Option<api::booking::PaymentStatus>,
        remarks: Nullable<api::scalar::Remarks>,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::UpdateBooking {
                booking_id: booking_id.into(),
                customer_phone: customer_phone.map(Into::into),
                room_id: room_id.map(Into::into),
                number_of_people: number_of_people.map(Into::into),
                check_in: check_in.map(DateTime::coerce),
                check_out: check_out.map(DateTime::coerce),
                duration: duration_type.map(Into::into),
                rates: rates(daily_cost, monthly_cost),
                early_check_in_cost: early_check_in_cost.explicit(),
                late_check_out_cost: late_check_out_cost.explicit(),
                status: status.map(Into::into),
                payment_status: payment_status.map(Into::into),
                remarks: patch(remarks),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Booking` along with its `Payment`s and `Invoice`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            booking_id = %booking_id,
            gql.name = "deleteBooking",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_booking(
        booking_id: api::booking::Id,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::DeleteBooking {
                booking_id: booking_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Requests the `Room` to be booked.
    ///
    /// A `Customer` may request only for themselves.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ROOM_NOT_EXISTS` - the `Room` with the specified ID does not exist;
    /// - `INVALID_INTERVAL` - `checkOut` doesn't go after `checkIn`;
    /// - `MISSING_CONFIGURATION` - the `Room` has no cost for this number of
    ///                             people;
    /// - `ROOM_UNAVAILABLE` - the `Room` is occupied for the stay;
    /// - `CURRENCY_MISMATCH` - costs are not in the property currency;
    /// - `NEGATIVE_COST` - a rate or surcharge is negative;
    /// - `NOT_OWNER` - the `customerPhone` belongs to another `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            check_in = ?check_in,
            check_out = ?check_out,
            customer_phone = %customer_phone,
            gql.name = "createBookingRequest",
            otel.name = Self::SPAN_NAME,
            room_id = %room_id,
        ),
    )]
    pub async fn create_booking_request(
        customer_name: api::customer::Name,
        customer_phone: api::customer::Phone,
        room_id: api::room::Id,
        number_of_people: api::scalar::PersonCount,
        check_in: DateTime,
        check_out: DateTime,
        duration_type: api::booking::DurationType,
        early_check_in_cost: Option<Money>,
        late_check_out_cost: Option<Money>,
        remarks: Option<api::scalar::Remarks>,
        ctx: &Context,
    ) -> Result<api::BookingRequest, Error> {
        let customer_phone = customer_phone.into();
        ctx.authorize_customer(&customer_phone).await?;

        ctx.service()
            .execute(command::CreateBookingRequest {
                customer_name: customer_name.into(),
                customer_phone,
                room_id: room_id.into(),
                number_of_people: number_of_people.into(),
                check_in: check_in.coerce(),
                check_out: check_out.coerce(),
                duration: duration_type.into(),
                early_check_in_cost,
                late_check_out_cost,
                remarks: remarks.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the provided fields of the pending `BookingRequest`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_REQUEST_NOT_EXISTS` - the `BookingRequest` with the
    ///                                  specified ID does not exist;
    /// - `REQUEST_NOT_PENDING` - the `BookingRequest` is decided already;
    /// - `ROOM_NOT_EXISTS` - the `Room` with the specified ID does not exist;
    /// - `INVALID_INTERVAL` - `checkOut` doesn't go after `checkIn`;
    /// - `MISSING_CONFIGURATION` - the `Room` has no cost for this number of
    ///                             people;
    /// - `CURRENCY_MISMATCH` - costs are not in the property currency;
    /// - `NEGATIVE_COST` - a rate or surcharge is negative;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateBookingRequest",
            otel.name = Self::SPAN_NAME,
            request_id = %request_id,
        ),
    )]
    pub async fn update_booking_request(
        request_id: api::booking_request::Id,
        customer_name: Option<api::customer::Name>,
        room_id: Option<api::room::Id>,
        number_of_people: Option<api::scalar::PersonCount>,
        check_in: Option<DateTime>,
        check_out: Option<DateTime>,
        duration_type: Option<api::booking::DurationType>,
        early_check_in_cost: Nullable<Money>,
        late_check_out_cost: Nullable<Money>,
        remarks: Nullable<api::scalar::Remarks>,
        ctx: &Context,
    ) -> Result<api::BookingRequest, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::UpdateBookingRequest {
                request_id: request_id.into(),
                customer_name: customer_name.map(Into::into),
                room_id: room_id.map(Into::into),
                number_of_people: number_of_people.map(Into::into),
                check_in: check_in.map(DateTime::coerce),
                check_out: check_out.map(DateTime::coerce),
                duration: duration_type.map(Into::into),
                early_check_in_cost: early_check_in_cost.explicit(),
                late_check_out_cost: late_check_out_cost.explicit(),
                remarks: patch(remarks),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Approves the pending `BookingRequest`, booking its `Room`.
    ///
    /// If the `Room` got occupied meanwhile, the `BookingRequest` is rejected
    /// instead and no `Booking` is returned.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_REQUEST_NOT_EXISTS` - the `BookingRequest` with the
    ///                                  specified ID does not exist;
    /// - `REQUEST_NOT_PENDING` - the `BookingRequest` is decided already;
    /// - `ROOM_NOT_EXISTS` - the requested `Room` does not exist anymore;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "approveBookingRequest",
            otel.name = Self::SPAN_NAME,
            request_id = %request_id,
        ),
    )]
    pub async fn approve_booking_request(
        request_id: api::booking_request::Id,
        ctx: &Context,
    ) -> Result<api::booking_request::Approval, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::ApproveBookingRequest {
                request_id: request_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Rejects the pending `BookingRequest` for the provided reason.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_REQUEST_NOT_EXISTS` - the `BookingRequest` with the
    ///                                  specified ID does not exist;
    /// - `REQUEST_NOT_PENDING` - the `BookingRequest` is decided already;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "rejectBookingRequest",
            otel.name = Self::SPAN_NAME,
            request_id = %request_id,
        ),
    )]
    pub async fn reject_booking_request(
        request_id: api::booking_request::Id,
        reason: api::booking_request::RejectionReason,
        ctx: &Context,
    ) -> Result<api::BookingRequest, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::RejectBookingRequest {
                request_id: request_id.into(),
                reason: reason.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `BookingRequest`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_REQUEST_NOT_EXISTS` - the `BookingRequest` with the
    ///                                  specified ID does not exist;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteBookingRequest",
            otel.name = Self::SPAN_NAME,
            request_id = %request_id,
        ),
    )]
    pub async fn delete_booking_request(
        request_id: api::booking_request::Id,
        ctx: &Context,
    ) -> Result<api::BookingRequest, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::DeleteBookingRequest {
                request_id: request_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Records a `Payment` made for the `Booking`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist;
    /// - `NON_POSITIVE_AMOUNT` - the `amount` is not positive;
    /// - `CURRENCY_MISMATCH` - the `amount` is not in the `Booking` currency;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            amount = %amount,
            booking_id = %booking_id,
            gql.name = "createPayment",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_payment(
        booking_id: api::booking::Id,
        amount: Money,
        method: api::payment::Method,
        status: Option<api::payment::Status>,
        screenshot_url: Option<api::scalar::Url>,
        transaction_id: Option<api::payment::TransactionId>,
        paid_at: Option<DateTime>,
        ctx: &Context,
    ) -> Result<api::Payment, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::CreatePayment {
                booking_id: booking_id.into(),
                amount,
                method: method.into(),
                status: status.map(Into::into),
                screenshot_url: screenshot_url.map(Into::into),
                transaction_id: transaction_id.map(Into::into),
                paid_at: paid_at.map(DateTime::coerce),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the provided fields of the `Payment`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PAYMENT_NOT_EXISTS` - the `Payment` with the specified ID does not
    ///                          exist;
    /// - `NON_POSITIVE_AMOUNT` - the `amount` is not positive;
    /// - `CURRENCY_MISMATCH` - the `amount` is not in the `Booking` currency;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updatePayment",
            otel.name = Self::SPAN_NAME,
            payment_id = %payment_id,
        ),
    )]
    pub async fn update_payment(
        payment_id: api::payment::Id,
        amount: Option<Money>,
        method: Option<api::payment::Method>,
        status: Option<api::payment::Status>,
        screenshot_url: Nullable<api::scalar::Url>,
        transaction_id: Nullable<api::payment::TransactionId>,
        paid_at: Option<DateTime>,
        ctx: &Context,
    ) -> Result<api::Payment, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::UpdatePayment {
                payment_id: payment_id.into(),
                amount,
                method: method.map(Into::into),
                status: status.map(Into::into),
                screenshot_url: patch(screenshot_url),
                transaction_id: patch(transaction_id),
                paid_at: paid_at.map(DateTime::coerce),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Payment`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PAYMENT_NOT_EXISTS` - the `Payment` with the specified ID does not
    ///                          exist;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deletePayment",
            otel.name = Self::SPAN_NAME,
            payment_id = %payment_id,
        ),
    )]
    pub async fn delete_payment(
        payment_id: api::payment::Id,
        ctx: &Context,
    ) -> Result<api::Payment, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::DeletePayment {
                payment_id: payment_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Records an `Expense`, accounted on today by default.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NON_POSITIVE_AMOUNT` - the `amount` is not positive;
    /// - `CURRENCY_MISMATCH` - the `amount` is not in the property currency;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            amount = %amount,
            category = ?category,
            gql.name = "createExpense",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_expense(
        description: api::scalar::Description,
        amount: Money,
        category: api::expense::Category,
        date: Option<Date>,
        ctx: &Context,
    ) -> Result<api::Expense, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::CreateExpense {
                description: description.into(),
                amount,
                category: category.into(),
                date,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the provided fields of the `Expense`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EXPENSE_NOT_EXISTS` - the `Expense` with the specified ID does not
    ///                          exist;
    /// - `NON_POSITIVE_AMOUNT` - the `amount` is not positive;
    /// - `CURRENCY_MISMATCH` - the `amount` is not in the property currency;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            expense_id = %expense_id,
            gql.name = "updateExpense",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn update_expense(
        expense_id: api::expense::Id,
        description: Option<api::scalar::Description>,
        amount: Option<Money>,
        category: Option<api::expense::Category>,
        date: Option<Date>,
        ctx: &Context,
    ) -> Result<api::Expense, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::UpdateExpense {
                expense_id: expense_id.into(),
                description: description.map(Into::into),
                amount,
                category: category.map(Into::into),
                date,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Expense`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EXPENSE_NOT_EXISTS` - the `Expense` with the specified ID does not
    ///                          exist;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            expense_id = %expense_id,
            gql.name = "deleteExpense",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_expense(
        expense_id: api::expense::Id,
        ctx: &Context,
    ) -> Result<api::Expense, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::DeleteExpense {
                expense_id: expense_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Issues an `Invoice` for the `Booking`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist;
    /// - `NEGATIVE_ADJUSTMENT` - the `tax` or `discount` is negative;
    /// - `CURRENCY_MISMATCH` - the `tax` or `discount` is not in the
    ///                         `Booking` currency;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            booking_id = %booking_id,
            gql.name = "createInvoice",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_invoice(
        booking_id: api::booking::Id,
        tax: Option<Money>,
        discount: Option<Money>,
        pdf_url: Option<api::scalar::Url>,
        ctx: &Context,
    ) -> Result<api::Invoice, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::CreateInvoice {
                booking_id: booking_id.into(),
                tax,
                discount,
                pdf_url: pdf_url.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the provided fields of the `Invoice`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVOICE_NOT_EXISTS` - the `Invoice` with the specified ID does not
    ///                          exist;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "updateInvoice",
            invoice_id = %invoice_id,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn update_invoice(
        invoice_id: api::invoice::Id,
        status: Option<api::invoice::Status>,
        pdf_url: Nullable<api::scalar::Url>,
        ctx: &Context,
    ) -> Result<api::Invoice, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::UpdateInvoice {
                invoice_id: invoice_id.into(),
                status: status.map(Into::into),
                pdf_url: patch(pdf_url),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Deletes the `Invoice`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVOICE_NOT_EXISTS` - the `Invoice` with the specified ID does not
    ///                          exist;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteInvoice",
            invoice_id = %invoice_id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_invoice(
        invoice_id: api::invoice::Id,
        ctx: &Context,
    ) -> Result<api::Invoice, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(command::DeleteInvoice {
                invoice_id: invoice_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum BookingError {
        #[code = "BOOKING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Booking` with the specified ID does not exist"]
        NotExists,

        #[code = "BOOKING_REQUEST_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`BookingRequest` with the specified ID does not exist"]
        RequestNotExists,

        #[code = "REQUEST_NOT_PENDING"]
        #[status = CONFLICT]
        #[message = "`BookingRequest` is approved or rejected already"]
        RequestNotPending,

        #[code = "INVALID_INTERVAL"]
        #[status = BAD_REQUEST]
        #[message = "`checkOut` must go strictly after `checkIn`"]
        InvalidInterval,

        #[code = "INVALID_TRANSITION"]
        #[status = CONFLICT]
        #[message = "`Booking` cannot move to the specified `status`"]
        InvalidTransition,

        #[code = "MISSING_CONFIGURATION"]
        #[status = CONFLICT]
        #[message = "`Room` has no cost for the specified number of people"]
        MissingConfiguration,

        #[code = "ROOM_UNAVAILABLE"]
        #[status = CONFLICT]
        #[message = "`Room` is unavailable for the requested period"]
        RoomUnavailable,
    }
}

define_error! {
    enum EntityError {
        #[code = "ROOM_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Room` with the specified ID does not exist"]
        RoomNotExists,

        #[code = "ROOM_CONFIGURATION_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`RoomConfiguration` with the specified ID does not \
                     exist"]
        ConfigurationNotExists,

        #[code = "CUSTOMER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Customer` with the specified phone does not exist"]
        CustomerNotExists,

        #[code = "PAYMENT_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Payment` with the specified ID does not exist"]
        PaymentNotExists,

        #[code = "EXPENSE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Expense` with the specified ID does not exist"]
        ExpenseNotExists,

        #[code = "INVOICE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Invoice` with the specified ID does not exist"]
        InvoiceNotExists,
    }
}

define_error! {
    enum AmountError {
        #[code = "CURRENCY_MISMATCH"]
        #[status = BAD_REQUEST]
        #[message = "Amount currency differs from the expected one"]
        CurrencyMismatch,

        #[code = "NON_POSITIVE_AMOUNT"]
        #[status = BAD_REQUEST]
        #[message = "Amount must be positive"]
        NonPositive,

        #[code = "NEGATIVE_ADJUSTMENT"]
        #[status = BAD_REQUEST]
        #[message = "Tax and discount must not be negative"]
        NegativeAdjustment,

        #[code = "NEGATIVE_COST"]
        #[status = BAD_REQUEST]
        #[message = "Rates and surcharges must not be negative"]
        NegativeCost,
    }
}

define_error! {
    enum ConfigurationError {
        #[code = "ROOM_CONFIGURATION_EXISTS"]
        #[status = CONFLICT]
        #[message = "`Room` is priced for the specified number of people \
                     already"]
        Exists,
    }
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LOGIN_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`UserLogin` is occupied by another `User`"]
                LoginOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::LoginOccupied(_) => Some(Error::LoginOccupied.into()),
        }
    }
}

impl AsError for command::create_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[status = FORBIDDEN]
                #[message = "Provided credentials does not match any \
                             principal"]
                WrongCredentials,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::UserNotExists(_)
            | Self::CustomerNotExists(_)
            | Self::WrongCredentials => Some(Error::WrongCredentials.into()),
        }
    }
}

impl AsError for command::register_customer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ALREADY_REGISTERED"]
                #[status = CONFLICT]
                #[message = "`Customer` with the specified phone is \
                             registered already"]
                AlreadyRegistered,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::AlreadyRegistered(_) => {
                Some(Error::AlreadyRegistered.into())
            }
        }
    }
}

impl AsError for command::create_room::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ROOM_NUMBER_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`RoomNumber` is occupied by another `Room`"]
                NumberOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NumberOccupied(_) => Some(Error::NumberOccupied.into()),
            Self::CurrencyMismatch => {
                Some(AmountError::CurrencyMismatch.into())
            }
            Self::NegativeCost => Some(AmountError::NegativeCost.into()),
        }
    }
}

impl AsError for command::update_room::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ROOM_NUMBER_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`RoomNumber` is occupied by another `Room`"]
                NumberOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::RoomNotExists(_) => Some(EntityError::RoomNotExists.into()),
            Self::NumberOccupied(_) => Some(Error::NumberOccupied.into()),
            Self::CurrencyMismatch => {
                Some(AmountError::CurrencyMismatch.into())
            }
            Self::NegativeCost => Some(AmountError::NegativeCost.into()),
        }
    }
}

impl AsError for command::delete_room::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "ROOM_IN_USE"]
                #[status = CONFLICT]
                #[message = "`Room` is referenced by `Booking`s"]
                InUse,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::RoomNotExists(_) => Some(EntityError::RoomNotExists.into()),
            Self::RoomInUse(_) => Some(Error::InUse.into()),
        }
    }
}

impl AsError for command::create_room_configuration::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::RoomNotExists(_) => Some(EntityError::RoomNotExists.into()),
            Self::ConfigurationExists { .. } => {
                Some(ConfigurationError::Exists.into())
            }
            Self::CurrencyMismatch => {
                Some(AmountError::CurrencyMismatch.into())
            }
            Self::NegativeCost => Some(AmountError::NegativeCost.into()),
        }
    }
}

impl AsError for command::update_room_configuration::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ConfigurationNotExists(_) => {
                Some(EntityError::ConfigurationNotExists.into())
            }
            Self::ConfigurationExists { .. } => {
                Some(ConfigurationError::Exists.into())
            }
            Self::CurrencyMismatch => {
                Some(AmountError::CurrencyMismatch.into())
            }
            Self::NegativeCost => Some(AmountError::NegativeCost.into()),
        }
    }
}

impl AsError for command::delete_room_configuration::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ConfigurationNotExists(_) => {
                Some(EntityError::ConfigurationNotExists.into())
            }
        }
    }
}

impl AsError for command::create_customer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "PHONE_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`CustomerPhone` is occupied by another \
                             `Customer`"]
                PhoneOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PhoneOccupied(_) => Some(Error::PhoneOccupied.into()),
        }
    }
}

impl AsError for command::update_customer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CustomerNotExists(_) => {
                Some(EntityError::CustomerNotExists.into())
            }
        }
    }
}

impl AsError for command::delete_customer::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "CUSTOMER_IN_USE"]
                #[status = CONFLICT]
                #[message = "`Customer` is referenced by `Booking`s"]
                InUse,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::CustomerNotExists(_) => {
                Some(EntityError::CustomerNotExists.into())
            }
            Self::CustomerInUse(_) => Some(Error::InUse.into()),
        }
    }
}

impl AsError for command::create_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidInterval => Some(BookingError::InvalidInterval.into()),
            Self::RoomNotExists(_) => Some(EntityError::RoomNotExists.into()),
            Self::CustomerNotExists(_) => {
                Some(EntityError::CustomerNotExists.into())
            }
            Self::MissingConfiguration { .. } => {
                Some(BookingError::MissingConfiguration.into())
            }
            Self::RoomUnavailable(_) => {
                Some(BookingError::RoomUnavailable.into())
            }
            Self::CurrencyMismatch => {
                Some(AmountError::CurrencyMismatch.into())
            }
            Self::NegativeCost => Some(AmountError::NegativeCost.into()),
        }
    }
}

impl AsError for command::update_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::BookingNotExists(_) => Some(BookingError::NotExists.into()),
            Self::RoomNotExists(_) => Some(EntityError::RoomNotExists.into()),
            Self::CustomerNotExists(_) => {
                Some(EntityError::CustomerNotExists.into())
            }
            Self::InvalidInterval => Some(BookingError::InvalidInterval.into()),
            Self::InvalidTransition { .. } => {
                Some(BookingError::InvalidTransition.into())
            }
            Self::MissingConfiguration { .. } => {
                Some(BookingError::MissingConfiguration.into())
            }
            Self::RoomUnavailable(_) => {
                Some(BookingError::RoomUnavailable.into())
            }
            Self::CurrencyMismatch => {
                Some(AmountError::CurrencyMismatch.into())
            }
            Self::NegativeCost => Some(AmountError::NegativeCost.into()),
        }
    }
}

impl AsError for command::delete_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::BookingNotExists(_) => Some(BookingError::NotExists.into()),
        }
    }
}

impl AsError for command::create_booking_request::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidInterval => Some(BookingError::InvalidInterval.into()),
            Self::RoomNotExists(_) => Some(EntityError::RoomNotExists.into()),
            Self::MissingConfiguration { .. } => {
                Some(BookingError::MissingConfiguration.into())
            }
            Self::RoomUnavailable(_) => {
                Some(BookingError::RoomUnavailable.into())
            }
            Self::CurrencyMismatch => {
                Some(AmountError::CurrencyMismatch.into())
            }
            Self::NegativeCost => Some(AmountError::NegativeCost.into()),
        }
    }
}

impl AsError for command::update_booking_request::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::RequestNotExists(_) => {
                Some(BookingError::RequestNotExists.into())
            }
            Self::RequestNotPending(_) => {
                Some(BookingError::RequestNotPending.into())
            }
            Self::RoomNotExists(_) => Some(EntityError::RoomNotExists.into()),
            Self::InvalidInterval => Some(BookingError::InvalidInterval.into()),
            Self::MissingConfiguration { .. } => {
                Some(BookingError::MissingConfiguration.into())
            }
            Self::CurrencyMismatch => {
                Some(AmountError::CurrencyMismatch.into())
            }
            Self::NegativeCost => Some(AmountError::NegativeCost.into()),
        }
    }
}

impl AsError for command::approve_booking_request::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::RequestNotExists(_) => {
                Some(BookingError::RequestNotExists.into())
            }
            Self::RequestNotPending(_) => {
                Some(BookingError::RequestNotPending.into())
            }
            Self::RoomNotExists(_) => Some(EntityError::RoomNotExists.into()),
        }
    }
}

impl AsError for command::reject_booking_request::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::RequestNotExists(_) => {
                Some(BookingError::RequestNotExists.into())
            }
            Self::RequestNotPending(_) => {
                Some(BookingError::RequestNotPending.into())
            }
        }
    }
}

impl AsError for command::delete_booking_request::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::RequestNotExists(_) => {
                Some(BookingError::RequestNotExists.into())
            }
        }
    }
}

impl AsError for command::create_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::BookingNotExists(_) => Some(BookingError::NotExists.into()),
            Self::NonPositiveAmount => Some(AmountError::NonPositive.into()),
            Self::CurrencyMismatch => {
                Some(AmountError::CurrencyMismatch.into())
            }
        }
    }
}

impl AsError for command::update_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PaymentNotExists(_) => {
                Some(EntityError::PaymentNotExists.into())
            }
            Self::NonPositiveAmount => Some(AmountError::NonPositive.into()),
            Self::CurrencyMismatch => {
                Some(AmountError::CurrencyMismatch.into())
            }
        }
    }
}

impl AsError for command::delete_payment::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::PaymentNotExists(_) => {
                Some(EntityError::PaymentNotExists.into())
            }
        }
    }
}

impl AsError for command::create_expense::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NonPositiveAmount => Some(AmountError::NonPositive.into()),
            Self::CurrencyMismatch => {
                Some(AmountError::CurrencyMismatch.into())
            }
        }
    }
}

impl AsError for command::update_expense::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ExpenseNotExists(_) => {
                Some(EntityError::ExpenseNotExists.into())
            }
            Self::NonPositiveAmount => Some(AmountError::NonPositive.into()),
            Self::CurrencyMismatch => {
                Some(AmountError::CurrencyMismatch.into())
            }
        }
    }
}

impl AsError for command::delete_expense::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ExpenseNotExists(_) => {
                Some(EntityError::ExpenseNotExists.into())
            }
        }
    }
}

impl AsError for command::create_invoice::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::BookingNotExists(_) => Some(BookingError::NotExists.into()),
            Self::NegativeAdjustment => {
                Some(AmountError::NegativeAdjustment.into())
            }
            Self::CurrencyMismatch => {
                Some(AmountError::CurrencyMismatch.into())
            }
        }
    }
}

impl AsError for command::update_invoice::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvoiceNotExists(_) => {
                Some(EntityError::InvoiceNotExists.into())
            }
        }
    }
}

impl AsError for command::delete_invoice::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvoiceNotExists(_) => {
                Some(EntityError::InvoiceNotExists.into())
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Money;
    use juniper::Nullable;

    use super::{patch, rates};

    #[test]
    fn patch_distinguishes_omitted_and_null() {
        assert_eq!(patch::<i32, i64>(Nullable::ImplicitNull), None);
        assert_eq!(patch::<i32, i64>(Nullable::ExplicitNull), Some(None));
        assert_eq!(patch::<i32, i64>(Nullable::Some(3)), Some(Some(3)));
    }

    #[test]
    fn rates_only_when_overridden() {
        assert!(rates(None, None).is_none());

        let daily = Money::from_str("500INR").unwrap();
        let r = rates(Some(daily), None).unwrap();
        assert_eq!(r.daily_cost, Some(daily));
        assert_eq!(r.monthly_cost, None);
    }
}
