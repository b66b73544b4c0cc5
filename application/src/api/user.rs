//! [`User`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use uuid::Uuid;

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// Staff [`User`] administrating the property.
#[derive(Clone, Debug, From)]
pub struct User(domain::User);

impl User {
    /// Loads the [`User`] with the provided ID.
    ///
    /// # Errors
    ///
    /// Errors if the [`User`] doesn't exist.
    pub(crate) async fn load(
        ctx: &Context,
        id: domain::user::Id,
    ) -> Result<Self, Error> {
        ctx.service()
            .execute(query::user::ById::by(id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .map(Self)
            .ok_or_else(|| UserError::NotExists.into())
            .map_err(ctx.error())
    }
}

/// Staff `User` administrating the property.
#[graphql_object(context = Context)]
impl User {
    /// Unique identifier of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Name of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Login of this `User`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.login",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn login(&self) -> Login {
        self.0.login.clone().into()
    }

    /// `DateTime` when this `User` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "User.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }
}

/// Unique identifier of a `User`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::user::Id)]
#[into(domain::user::Id)]
#[graphql(name = "UserId", transparent)]
pub struct Id(Uuid);

/// Name of a `User`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserName",
    with = scalar::Via::<domain::user::Name>,
)]
pub struct Name(domain::user::Name);

/// Login of a `User`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "UserLogin",
    with = scalar::Via::<domain::user::Login>,
)]
pub struct Login(domain::user::Login);

define_error! {
    enum UserError {
        #[code = "USER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`User` with the specified ID does not exist"]
        NotExists,
    }
}

pub mod session {
    //! [`Session`]-related definitions.
    //!
    //! [`Session`]: crate::Session

    use common::DateTime;
    use derive_more::{AsRef, From, Into};
    use juniper::{graphql_object, GraphQLScalar};
    use service::{command, domain, domain::session::Principal};

    use crate::{api, api::scalar, Context, Error};

    /// `Session` access token.
    #[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
    #[graphql(
        name = "SessionToken",
        with = scalar::Via::<domain::session::Token>,
    )]
    pub struct Token(domain::session::Token);

    /// Result of a `Session` creation.
    #[derive(Clone, Debug, From)]
    pub struct CreateResult(command::create_session::Output);

    /// Result of a `Session` creation.
    #[graphql_object(context = Context, name = "CreateSessionResult")]
    impl CreateResult {
        /// Access token of the created `Session`.
        #[must_use]
        pub fn token(&self) -> Token {
            self.0.token.clone().into()
        }

        /// Staff `User` the created `Session` is issued to, if any.
        pub async fn user(
            &self,
            ctx: &Context,
        ) -> Result<Option<api::User>, Error> {
            match &self.0.principal {
                Principal::Staff(id) => {
                    api::User::load(ctx, *id).await.map(Some)
                }
                Principal::Customer(_) => Ok(None),
            }
        }

        /// `Customer` the created `Session` is issued to, if any.
        pub async fn customer(
            &self,
            ctx: &Context,
        ) -> Result<Option<api::Customer>, Error> {
            match &self.0.principal {
                Principal::Customer(phone) => {
                    api::Customer::load(ctx, phone.clone()).await.map(Some)
                }
                Principal::Staff(_) => Ok(None),
            }
        }

        /// `DateTime` when the created `Session` expires.
        #[must_use]
        pub fn expires_at(&self) -> DateTime {
            self.0.expires_at.coerce()
        }
    }
}
