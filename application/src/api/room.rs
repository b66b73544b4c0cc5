//! [`Room`]-related definitions.

use common::{DateTime, Money};
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, read, Query as _};
use uuid::Uuid;

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// Room of the property.
#[derive(Clone, Debug, From)]
pub struct Room(domain::Room);

impl Room {
    /// Loads the [`Room`] with the provided ID.
    ///
    /// # Errors
    ///
    /// Errors if the [`Room`] doesn't exist.
    pub(crate) async fn load(
        ctx: &Context,
        id: domain::room::Id,
    ) -> Result<Self, Error> {
        ctx.service()
            .execute(query::room::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .map(Self)
            .ok_or_else(|| RoomError::NotExists.into())
            .map_err(ctx.error())
    }
}

/// Room of the property.
#[graphql_object(context = Context)]
impl Room {
    /// Unique identifier of this `Room`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Room.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Number of this `Room`, unique across the property.
    #[must_use]
    pub fn number(&self) -> Number {
        self.0.number.clone().into()
    }

    /// Bathroom kind of this `Room`.
    #[must_use]
    pub fn bathroom(&self) -> Bathroom {
        self.0.bathroom.into()
    }

    /// Indicator whether this `Room` is offered for bookings.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.0.is_available
    }

    /// Description of this `Room`.
    #[must_use]
    pub fn description(&self) -> Option<scalar::Description> {
        self.0.description.clone().map(Into::into)
    }

    /// Reference daily cost of this `Room`.
    ///
    /// Applies only if this `Room` has no `RoomConfiguration`s.
    #[must_use]
    pub fn daily_cost(&self) -> Option<Money> {
        self.0.daily_cost
    }

    /// Reference monthly cost of this `Room`.
    ///
    /// Applies only if this `Room` has no `RoomConfiguration`s.
    #[must_use]
    pub fn monthly_cost(&self) -> Option<Money> {
        self.0.monthly_cost
    }

    /// Pricing tiers of this `Room`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Room.configurations",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn configurations(
        &self,
        ctx: &Context,
    ) -> Result<Vec<Configuration>, Error> {
        Configuration::list(ctx, read::room::configuration::Filter::room(
            self.0.id,
        ))
        .await
    }

    /// `DateTime` when this `Room` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Room` was last modified.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Unique identifier of a `Room`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::room::Id)]
#[into(domain::room::Id)]
#[graphql(name = "RoomId", transparent)]
pub struct Id(Uuid);

/// Number (label) of a `Room`, like `201A`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "RoomNumber",
    with = scalar::Via::<domain::room::Number>,
)]
pub struct Number(domain::room::Number);

define_enum! {
    #[doc = "Kind of a `Room` bathroom."]
    #[graphql(name = "RoomBathroom")]
    enum Bathroom = domain::room::Bathroom {
        #[doc = "Bathroom attached to the `Room`."]
        Attached,
        #[doc = "Shared bathroom outside the `Room`."]
        NonAttached,
    }
}

/// Pricing tier of a `Room` for a specific number of occupants.
#[derive(Clone, Debug, From)]
pub struct Configuration(domain::room::Configuration);

impl Configuration {
    /// Loads the [`Configuration`] with the provided ID.
    ///
    /// # Errors
    ///
    /// Errors if the [`Configuration`] doesn't exist.
    pub(crate) async fn load(
        ctx: &Context,
        id: domain::room::configuration::Id,
    ) -> Result<Self, Error> {
        ctx.service()
            .execute(query::room::ConfigurationById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .map(Self)
            .ok_or_else(|| RoomError::ConfigurationNotExists.into())
            .map_err(ctx.error())
    }

    /// Lists the [`Configuration`]s matching the provided filter.
    pub(crate) async fn list(
        ctx: &Context,
        filter: read::room::configuration::Filter,
    ) -> Result<Vec<Self>, Error> {
        ctx.service()
            .execute(query::room::Configurations::by(filter))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|cs| cs.into_iter().map(Self).collect())
    }
}

/// Pricing tier of a `Room` for a specific number of occupants.
#[graphql_object(context = Context, name = "RoomConfiguration")]
impl Configuration {
    /// Unique identifier of this `RoomConfiguration`.
    #[must_use]
    pub fn id(&self) -> ConfigurationId {
        self.0.id.into()
    }

    /// `Room` this `RoomConfiguration` prices.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RoomConfiguration.room",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn room(&self, ctx: &Context) -> Result<Room, Error> {
        Room::load(ctx, self.0.room_id).await
    }

    /// Number of occupants this `RoomConfiguration` applies to.
    #[must_use]
    pub fn person_count(&self) -> scalar::PersonCount {
        self.0.person_count.into()
    }

    /// Cost of a single day.
    #[must_use]
    pub fn daily_cost(&self) -> Money {
        self.0.daily_cost
    }

    /// Cost of a 30-day month.
    #[must_use]
    pub fn monthly_cost(&self) -> Money {
        self.0.monthly_cost
    }

    /// Indicator whether this `RoomConfiguration` is offered for bookings.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.0.is_available
    }

    /// Description of this `RoomConfiguration`.
    #[must_use]
    pub fn description(&self) -> Option<scalar::Description> {
        self.0.description.clone().map(Into::into)
    }

    /// `DateTime` when this `RoomConfiguration` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `RoomConfiguration` was last modified.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Unique identifier of a `RoomConfiguration`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::room::configuration::Id)]
#[into(domain::room::configuration::Id)]
#[graphql(name = "RoomConfigurationId", transparent)]
pub struct ConfigurationId(Uuid);

define_error! {
    enum RoomError {
        #[code = "ROOM_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Room` with the specified ID does not exist"]
        NotExists,

        #[code = "ROOM_CONFIGURATION_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`RoomConfiguration` with the specified ID does not exist"]
        ConfigurationNotExists,
    }
}

pub mod list {
    //! Definitions related to [`Room`] lists.
    //!
    //! [`Room`]: super::Room

    use service::{query, read::room::list as read};

    use super::Room;

    define_list!(
        node = Room,
        total = query::rooms::TotalCount,
        names = (
            "RoomListCursor",
            "RoomListEdge",
            "RoomListConnection",
            "RoomListPageInfo",
        ),
    );
}
