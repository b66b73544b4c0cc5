//! GraphQL [`Query`]s definitions.

use common::{Date, DateTime};
use juniper::graphql_object;
use service::{
    domain::session::Principal,
    query::{self, dashboard},
    read, Query as _,
};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the currently authenticated staff `User`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myUser",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_user(ctx: &Context) -> Result<api::User, Error> {
        let my_id = ctx.staff().await?;
        api::User::load(ctx, my_id).await
    }

    /// Returns the currently authenticated `Customer`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_CUSTOMER` - the current session belongs to a staff `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myCustomer",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_customer(ctx: &Context) -> Result<api::Customer, Error> {
        match ctx.current_session().await?.principal {
            Principal::Customer(phone) => api::Customer::load(ctx, phone).await,
            Principal::Staff(_) => Err(api::PrivilegeError::Customer.into())
                .map_err(ctx.error()),
        }
    }

    /// Returns the staff `User` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `USER_NOT_EXISTS` - the `User` with the specified ID does not exist;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "user",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn user(
        id: api::user::Id,
        ctx: &Context,
    ) -> Result<api::User, Error> {
        _ = ctx.staff().await?;
        api::User::load(ctx, id.into()).await
    }

    /// Returns the `Room` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ROOM_NOT_EXISTS` - the `Room` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "room",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn room(
        id: api::room::Id,
        ctx: &Context,
    ) -> Result<api::Room, Error> {
        api::Room::load(ctx, id.into()).await
    }

    /// Fetches the page of `Room`s ordered by their IDs.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            first = ?first,
            gql.name = "rooms",
            is_available = ?is_available,
            last = ?last,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn rooms(
        first: Option<i32>,
        after: Option<api::room::list::Cursor>,
        last: Option<i32>,
        before: Option<api::room::list::Cursor>,
        is_available: Option<bool>,
        ctx: &Context,
    ) -> Result<api::room::list::Connection, Error> {
        use read::room::list as read;

        let arguments = read::Arguments::new(
            first,
            after.map(Into::into),
            last,
            before.map(Into::into),
            api::DEFAULT_PAGE_SIZE,
        )
        .ok_or_else(|| api::PaginationError::Ambiguous.into())
        .map_err(ctx.error())?;
        let filter = read::Filter { is_available };

        ctx.service()
            .execute(query::rooms::List::by(read::Selector {
                arguments,
                filter,
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| api::room::list::Connection::new(page, filter))
    }

    /// Returns the `RoomConfiguration`s matching the specified filter.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "roomConfigurations",
            otel.name = Self::SPAN_NAME,
            person_count = ?person_count,
            room_id = ?room_id,
        ),
    )]
    pub async fn room_configurations(
        room_id: Option<api::room::Id>,
        person_count: Option<api::scalar::PersonCount>,
        is_available: Option<bool>,
        ctx: &Context,
    ) -> Result<Vec<api::room::Configuration>, Error> {
        api::room::Configuration::list(
            ctx,
            read::room::configuration::Filter {
                room_id: room_id.map(Into::into),
                person_count: person_count.map(Into::into),
                is_available,
            },
        )
        .await
    }

    /// Returns the `RoomConfiguration` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ROOM_CONFIGURATION_NOT_EXISTS` - the `RoomConfiguration` with the
    ///                                     specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "roomConfiguration",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn room_configuration(
        id: api::room::ConfigurationId,
        ctx: &Context,
    ) -> Result<api::room::Configuration, Error> {
        api::room::Configuration::load(ctx, id.into()).await
    }

    /// Checks whether the specified `Room` is free for the specified stay.
    ///
    /// Adjacent stays don't conflict: a check-out at the moment of another
    /// check-in is fine.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ROOM_NOT_EXISTS` - the `Room` with the specified ID does not exist;
    /// - `INVALID_INTERVAL` - `checkOut` doesn't go after `checkIn`.
    #[tracing::instrument(
        skip_all,
        fields(
            check_in = ?check_in,
            check_out = ?check_out,
            gql.name = "roomAvailability",
            otel.name = Self::SPAN_NAME,
            room_id = %room_id,
        ),
    )]
    pub async fn room_availability(
        room_id: api::room::Id,
        check_in: DateTime,
        check_out: DateTime,
        ctx: &Context,
    ) -> Result<bool, Error> {
        ctx.service()
            .execute(query::availability::Availability {
                room_id: room_id.into(),
                check_in: check_in.coerce(),
                check_out: check_out.coerce(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Returns the `Room`s flagged as available and free for the specified
    /// stay.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_INTERVAL` - `checkOut` doesn't go after `checkIn`.
    #[tracing::instrument(
        skip_all,
        fields(
            check_in = ?check_in,
            check_out = ?check_out,
            gql.name = "availableRooms",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn available_rooms(
        check_in: DateTime,
        check_out: DateTime,
        ctx: &Context,
    ) -> Result<Vec<api::Room>, Error> {
        ctx.service()
            .execute(query::rooms::Available {
                check_in: check_in.coerce(),
                check_out: check_out.coerce(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|rooms| rooms.into_iter().map(Into::into).collect())
    }

    /// Returns the `Customer` with the specified phone.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `CUSTOMER_NOT_EXISTS` - the `Customer` with the specified phone does
    ///                           not exist;
    /// - `NOT_OWNER` - the current session belongs to another `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "customer",
            otel.name = Self::SPAN_NAME,
            phone = %phone,
        ),
    )]
    pub async fn customer(
        phone: api::customer::Phone,
        ctx: &Context,
    ) -> Result<api::Customer, Error> {
        let phone = phone.into();
        ctx.authorize_customer(&phone).await?;
        api::Customer::load(ctx, phone).await
    }

    /// Fetches the page of `Customer`s ordered by their phones.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            first = ?first,
            gql.name = "customers",
            last = ?last,
            name = ?name.as_ref().map(ToString::to_string),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn customers(
        first: Option<i32>,
        after: Option<api::customer::list::Cursor>,
        last: Option<i32>,
        before: Option<api::customer::list::Cursor>,
        name: Option<api::customer::Name>,
        ctx: &Context,
    ) -> Result<api::customer::list::Connection, Error> {
        use read::customer::list as read;

        _ = ctx.staff().await?;

        let arguments = read::Arguments::new(
            first,
            after.map(Into::into),
            last,
            before.map(Into::into),
            api::DEFAULT_PAGE_SIZE,
        )
        .ok_or_else(|| api::PaginationError::Ambiguous.into())
        .map_err(ctx.error())?;
        let filter = read::Filter {
            name: name.map(Into::into),
        };

        ctx.service()
            .execute(query::customers::List::by(read::Selector {
                arguments,
                filter: filter.clone(),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| api::customer::list::Connection::new(page, filter))
    }

    /// Returns the `Booking` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist;
    /// - `NOT_OWNER` - the `Booking` belongs to another `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "booking",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn booking(
        id: api::booking::Id,
        ctx: &Context,
    ) -> Result<api::Booking, Error> {
        let booking = api::Booking::load(ctx, id.into()).await?;
        ctx.authorize_customer(&booking.domain().customer_phone)
            .await?;
        Ok(booking)
    }

    /// Fetches the page of `Booking`s ordered by their IDs.
    ///
    /// A `Customer` always gets their own `Booking`s only.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            first = ?first,
            gql.name = "bookings",
            last = ?last,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn bookings(
        first: Option<i32>,
        after: Option<api::booking::list::Cursor>,
        last: Option<i32>,
        before: Option<api::booking::list::Cursor>,
        room_id: Option<api::room::Id>,
        customer_phone: Option<api::customer::Phone>,
        status: Option<api::booking::Status>,
        payment_status: Option<api::booking::PaymentStatus>,
        check_in_from: Option<Date>,
        check_in_to: Option<Date>,
        ctx: &Context,
    ) -> Result<api::booking::list::Connection, Error> {
        use read::booking::list as read;

        let arguments = read::Arguments::new(
            first,
            after.map(Into::into),
            last,
            before.map(Into::into),
            api::DEFAULT_PAGE_SIZE,
        )
        .ok_or_else(|| api::PaginationError::Ambiguous.into())
        .map_err(ctx.error())?;
        let customer_phone = match ctx.current_session().await?.principal {
            Principal::Staff(_) => customer_phone.map(Into::into),
            Principal::Customer(me) => Some(me),
        };
        let filter = read::Filter {
            room_id: room_id.map(Into::into),
            customer_phone,
            status: status.map(Into::into),
            payment_status: payment_status.map(Into::into),
            check_in_from,
            check_in_to,
        };

        ctx.service()
            .execute(query::bookings::List::by(read::Selector {
                arguments,
                filter: filter.clone(),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| api::booking::list::Connection::new(page, filter))
    }

    /// Reconciles the `Payment`s of the specified `Booking` against its
    /// total amount.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist;
    /// - `NOT_OWNER` - the `Booking` belongs to another `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            booking_id = %booking_id,
            gql.name = "bookingReconciliation",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn booking_reconciliation(
        booking_id: api::booking::Id,
        ctx: &Context,
    ) -> Result<api::booking::Reconciliation, Error> {
        let reconciliation =
            api::booking::Reconciliation::load(ctx, booking_id.into()).await?;
        ctx.authorize_customer(&reconciliation.reconciled().customer_phone)
            .await?;
        Ok(reconciliation)
    }

    /// Returns the `Payment`s made for the specified `Booking`, oldest
    /// first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_NOT_EXISTS` - the `Booking` with the specified ID does not
    ///                          exist;
    /// - `NOT_OWNER` - the `Booking` belongs to another `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            booking_id = %booking_id,
            gql.name = "paymentsByBooking",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn payments_by_booking(
        booking_id: api::booking::Id,
        ctx: &Context,
    ) -> Result<Vec<api::Payment>, Error> {
        let booking = api::Booking::load(ctx, booking_id.into()).await?;
        ctx.authorize_customer(&booking.domain().customer_phone)
            .await?;

        ctx.service()
            .execute(query::payments::ByBooking::by(booking_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|ps| ps.into_iter().map(Into::into).collect())
    }

    /// Returns the `BookingRequest` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `BOOKING_REQUEST_NOT_EXISTS` - the `BookingRequest` with the
    ///                                  specified ID does not exist;
    /// - `NOT_OWNER` - the `BookingRequest` belongs to another `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "bookingRequest",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn booking_request(
        id: api::booking_request::Id,
        ctx: &Context,
    ) -> Result<api::BookingRequest, Error> {
        let request = api::BookingRequest::load(ctx, id.into()).await?;
        ctx.authorize_customer(&request.domain().customer_phone)
            .await?;
        Ok(request)
    }

    /// Fetches the page of `BookingRequest`s ordered by their IDs.
    ///
    /// A `Customer` always gets their own `BookingRequest`s only.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            first = ?first,
            gql.name = "bookingRequests",
            last = ?last,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn booking_requests(
        first: Option<i32>,
        after: Option<api::booking_request::list::Cursor>,
        last: Option<i32>,
        before: Option<api::booking_request::list::Cursor>,
        status: Option<api::booking_request::Status>,
        room_id: Option<api::room::Id>,
        customer_phone: Option<api::customer::Phone>,
        ctx: &Context,
    ) -> Result<api::booking_request::list::Connection, Error> {
        use read::booking::request::list as read;

        let arguments = read::Arguments::new(
            first,
            after.map(Into::into),
            last,
            before.map(Into::into),
            api::DEFAULT_PAGE_SIZE,
        )
        .ok_or_else(|| api::PaginationError::Ambiguous.into())
        .map_err(ctx.error())?;
        let customer_phone = match ctx.current_session().await?.principal {
            Principal::Staff(_) => customer_phone.map(Into::into),
            Principal::Customer(me) => Some(me),
        };
        let filter = read::Filter {
            status: status.map(Into::into),
            room_id: room_id.map(Into::into),
            customer_phone,
        };

        ctx.service()
            .execute(query::booking_requests::List::by(read::Selector {
                arguments,
                filter: filter.clone(),
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| {
                api::booking_request::list::Connection::new(page, filter)
            })
    }

    /// Returns the `Payment` with the specified ID.
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
            gql.name = "payment",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn payment(
        id: api::payment::Id,
        ctx: &Context,
    ) -> Result<api::Payment, Error> {
        _ = ctx.staff().await?;
        api::Payment::load(ctx, id.into()).await
    }

    /// Fetches the page of `Payment`s ordered by their IDs.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            first = ?first,
            gql.name = "payments",
            last = ?last,
            otel.name = Self::SPAN_NAME,
            status = ?status,
        ),
    )]
    pub async fn payments(
        first: Option<i32>,
        after: Option<api::payment::list::Cursor>,
        last: Option<i32>,
        before: Option<api::payment::list::Cursor>,
        booking_id: Option<api::booking::Id>,
        status: Option<api::payment::Status>,
        ctx: &Context,
    ) -> Result<api::payment::list::Connection, Error> {
        use read::payment::list as read;

        _ = ctx.staff().await?;

        let arguments = read::Arguments::new(
            first,
            after.map(Into::into),
            last,
            before.map(Into::into),
            api::DEFAULT_PAGE_SIZE,
        )
        .ok_or_else(|| api::PaginationError::Ambiguous.into())
        .map_err(ctx.error())?;
        let filter = read::Filter {
            booking_id: booking_id.map(Into::into),
            status: status.map(Into::into),
        };

        ctx.service()
            .execute(query::payments::List::by(read::Selector {
                arguments,
                filter,
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| api::payment::list::Connection::new(page, filter))
    }

    /// Returns the `Expense` with the specified ID.
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
            gql.name = "expense",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn expense(
        id: api::expense::Id,
        ctx: &Context,
    ) -> Result<api::Expense, Error> {
        _ = ctx.staff().await?;
        api::Expense::load(ctx, id.into()).await
    }

    /// Fetches the page of `Expense`s ordered by their IDs.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            category = ?category,
            first = ?first,
            gql.name = "expenses",
            last = ?last,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn expenses(
        first: Option<i32>,
        after: Option<api::expense::list::Cursor>,
        last: Option<i32>,
        before: Option<api::expense::list::Cursor>,
        category: Option<api::expense::Category>,
        ctx: &Context,
    ) -> Result<api::expense::list::Connection, Error> {
        use read::expense::list as read;

        _ = ctx.staff().await?;

        let arguments = read::Arguments::new(
            first,
            after.map(Into::into),
            last,
            before.map(Into::into),
            api::DEFAULT_PAGE_SIZE,
        )
        .ok_or_else(|| api::PaginationError::Ambiguous.into())
        .map_err(ctx.error())?;
        let filter = read::Filter {
            category: category.map(Into::into),
        };

        ctx.service()
            .execute(query::expenses::List::by(read::Selector {
                arguments,
                filter,
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| api::expense::list::Connection::new(page, filter))
    }

    /// Returns the `Invoice` with the specified ID.
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
            gql.name = "invoice",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn invoice(
        id: api::invoice::Id,
        ctx: &Context,
    ) -> Result<api::Invoice, Error> {
        _ = ctx.staff().await?;
        api::Invoice::load(ctx, id.into()).await
    }

    /// Fetches the page of `Invoice`s ordered by their IDs.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AMBIGUOUS_PAGINATION_ARGUMENTS` - the pagination arguments are
    ///                                      ambiguous;
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            after = ?after,
            before = ?before,
            first = ?first,
            gql.name = "invoices",
            last = ?last,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn invoices(
        first: Option<i32>,
        after: Option<api::invoice::list::Cursor>,
        last: Option<i32>,
        before: Option<api::invoice::list::Cursor>,
        booking_id: Option<api::booking::Id>,
        ctx: &Context,
    ) -> Result<api::invoice::list::Connection, Error> {
        use read::invoice::list as read;

        _ = ctx.staff().await?;

        let arguments = read::Arguments::new(
            first,
            after.map(Into::into),
            last,
            before.map(Into::into),
            api::DEFAULT_PAGE_SIZE,
        )
        .ok_or_else(|| api::PaginationError::Ambiguous.into())
        .map_err(ctx.error())?;
        let filter = read::Filter {
            booking_id: booking_id.map(Into::into),
        };

        ctx.service()
            .execute(query::invoices::List::by(read::Selector {
                arguments,
                filter,
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|page| api::invoice::list::Connection::new(page, filter))
    }

    /// Summarizes the specified day of the property, today by default.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            date = ?date,
            gql.name = "todaySummary",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn today_summary(
        date: Option<Date>,
        ctx: &Context,
    ) -> Result<api::dashboard::TodaySummary, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(dashboard::TodaySummary {
                date: date.unwrap_or_else(Date::today),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns every `Room` along with the `Booking` occupying it on the
    /// specified day, today by default.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_STAFF` - the current session belongs to a `Customer`.
    #[tracing::instrument(
        skip_all,
        fields(
            date = ?date,
            gql.name = "roomOccupancy",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn room_occupancy(
        date: Option<Date>,
        ctx: &Context,
    ) -> Result<api::dashboard::RoomOccupancy, Error> {
        _ = ctx.staff().await?;

        ctx.service()
            .execute(dashboard::RoomOccupancy {
                date: date.unwrap_or_else(Date::today),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the most recently created `Booking`s, newest first.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_STAFF` - the current session belongs to a `Customer`;
    /// - `INVALID_LIMIT` - `limit` is not positive.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "recentBookings",
            limit = ?limit,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn recent_bookings(
        limit: Option<i32>,
        ctx: &Context,
    ) -> Result<Vec<api::Booking>, Error> {
        _ = ctx.staff().await?;

        let query = match limit {
            None => dashboard::RecentBookings::default(),
            Some(limit) => dashboard::RecentBookings {
                limit: u16::try_from(limit)
                    .ok()
                    .filter(|l| *l > 0)
                    .ok_or_else(|| LimitError::Invalid.into())
                    .map_err(ctx.error())?,
            },
        };

        ctx.service()
            .execute(query)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|bs| bs.into_iter().map(Into::into).collect())
    }
}

impl AsError for query::availability::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use query::availability::ExecutionError as E;

        define_error! {
            enum AvailabilityError {
                #[code = "INVALID_INTERVAL"]
                #[status = BAD_REQUEST]
                #[message = "`checkOut` must go strictly after `checkIn`"]
                InvalidInterval,

                #[code = "ROOM_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Room` with the specified ID does not exist"]
                RoomNotExists,
            }
        }

        match self {
            E::Db(e) => e.try_as_error(),
            E::InvalidInterval => {
                Some(AvailabilityError::InvalidInterval.into())
            }
            E::RoomNotExists(_) => {
                Some(AvailabilityError::RoomNotExists.into())
            }
        }
    }
}

impl AsError for query::rooms::AvailableError {
    fn try_as_error(&self) -> Option<Error> {
        use query::rooms::AvailableError as E;

        define_error! {
            enum AvailableError {
                #[code = "INVALID_INTERVAL"]
                #[status = BAD_REQUEST]
                #[message = "`checkOut` must go strictly after `checkIn`"]
                InvalidInterval,
            }
        }

        match self {
            E::Db(e) => e.try_as_error(),
            E::InvalidInterval => Some(AvailableError::InvalidInterval.into()),
        }
    }
}

define_error! {
    enum LimitError {
        #[code = "INVALID_LIMIT"]
        #[status = BAD_REQUEST]
        #[message = "`limit` must be a positive number not greater than \
                     65535"]
        Invalid,
    }
}
