//! [`Command`] for creating a [`Session`].

use common::{
    operations::{By, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::session::Token;
use crate::{
    domain::{
        credentials::Password,
        customer,
        session::{self, Principal},
        user, Customer, Session, User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a [`Session`].
#[derive(Debug, From)]
pub enum CreateSession {
    /// Create a new [`Session`] by staff [`User`] credentials.
    ByStaffCredentials {
        /// [`user::Login`] of a [`User`].
        login: user::Login,

        /// [`Password`] of a [`User`].
        password: SecretBox<Password>,
    },

    /// Create a new [`Session`] by [`Customer`] credentials.
    ByCustomerCredentials {
        /// [`customer::Phone`] of a [`Customer`].
        phone: customer::Phone,

        /// [`Password`] of a [`Customer`].
        password: SecretBox<Password>,
    },

    /// Create a new [`Session`] for an already authenticated [`Principal`].
    ByPrincipal(Principal),
}

/// Output of [`CreateSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Token`] of the created [`Session`].
    pub token: session::Token,

    /// [`Principal`] the [`Session`] has been created for.
    pub principal: Principal,

    /// [`DateTime`] when the [`Session`] expires.
    pub expires_at: session::ExpirationDateTime,
}

impl<Db> Command<CreateSession> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + for<'l> Database<
            Select<By<Option<User>, &'l user::Login>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + for<'p> Database<
            Select<By<Option<Customer>, &'p customer::Phone>>,
            Ok = Option<Customer>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateSession,
    ) -> Result<Self::Ok, Self::Err> {
        use CreateSession as Cmd;
        use ExecutionError as E;

        let principal = match cmd {
            Cmd::ByStaffCredentials { login, password } => {
                let user = self
                    .database()
                    .execute(Select(By::<Option<User>, _>::new(&login)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or(E::WrongCredentials)
                    .map_err(tracerr::wrap!())?;
                if !user.password_hash.verify(password.expose_secret()) {
                    return Err(tracerr::new!(E::WrongCredentials));
                }
                Principal::Staff(user.id)
            }
            Cmd::ByCustomerCredentials { phone, password } => {
                let customer = self
                    .database()
                    .execute(Select(By::<Option<Customer>, _>::new(&phone)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or(E::WrongCredentials)
                    .map_err(tracerr::wrap!())?;
                let verified = customer
                    .password_hash
                    .is_some_and(|h| h.verify(password.expose_secret()));
                if !verified {
                    return Err(tracerr::new!(E::WrongCredentials));
                }
                Principal::Customer(customer.phone)
            }
            Cmd::ByPrincipal(Principal::Staff(id)) => {
                let user = self
                    .database()
                    .execute(Select(By::<Option<User>, _>::new(id)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or(E::UserNotExists(id))
                    .map_err(tracerr::wrap!())?;
                Principal::Staff(user.id)
            }
            Cmd::ByPrincipal(Principal::Customer(phone)) => {
                let customer = self
                    .database()
                    .execute(Select(By::<Option<Customer>, _>::new(&phone)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                if customer.is_none() {
                    return Err(tracerr::new!(E::CustomerNotExists(phone)));
                }
                Principal::Customer(phone)
            }
        };

        let expires_at = (DateTime::now() + self.config().session_ttl).coerce();
        let token = jsonwebtoken::encode::<Session>(
            &jsonwebtoken::Header::default(),
            &Session {
                principal: principal.clone(),
                expires_at,
            },
            &self.config().jwt_encoding_key,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

        // SAFETY: `jsonwebtoken::encode` always returns a valid
        //         `session::Token`.
        #[expect(unsafe_code, reason = "invariants are preserved")]
        let token = unsafe { session::Token::new_unchecked(token) };

        Ok(Output {
            token,
            principal,
            expires_at,
        })
    }
}

/// Error of [`CreateSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`jsonwebtoken`] encoding error.
    #[display("Failed to encode a JSON Web Token: {_0}")]
    JsonWebTokenEncodeError(jsonwebtoken::errors::Error),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),

    /// [`Customer`] with the provided phone does not exist.
    #[display("`Customer(phone: {_0})` does not exist")]
    #[from(ignore)]
    CustomerNotExists(#[error(not(source))] customer::Phone),

    /// Wrong credentials are provided.
    #[display("Wrong credentials")]
    WrongCredentials,
}
