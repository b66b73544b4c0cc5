//! [`Command`] for authorizing a [`Session`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use jsonwebtoken::Validation;
use tracerr::Traced;

use crate::{
    domain::{
        customer,
        session::{self, Principal},
        user, Customer, Session, User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a [`Session`].
///
/// Succeeds only while the [`Principal`] of the [`Session`] still exists.
#[derive(Clone, Debug, From)]
pub struct AuthorizeSession {
    /// [`Session`] token to authorize.
    pub token: session::Token,
}

impl<Db> Command<AuthorizeSession> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + for<'p> Database<
            Select<By<Option<Customer>, &'p customer::Phone>>,
            Ok = Option<Customer>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeSession,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeSession { token } = cmd;

        let session = jsonwebtoken::decode::<Session>(
            token.as_ref(),
            &self.config().jwt_decoding_key,
            &Validation::default(),
        )
        .map_err(tracerr::from_and_wrap!(=> E))?
        .claims;

        match &session.principal {
            Principal::Staff(id) => {
                let user = self
                    .database()
                    .execute(Select(By::<Option<User>, _>::new(*id)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                if user.is_none() {
                    return Err(tracerr::new!(E::UserNotExists(*id)));
                }
            }
            Principal::Customer(phone) => {
                let customer = self
                    .database()
                    .execute(Select(By::<Option<Customer>, _>::new(phone)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?;
                if customer.is_none() {
                    return Err(tracerr::new!(E::CustomerNotExists(
                        phone.clone()
                    )));
                }
            }
        }

        Ok(session)
    }
}

/// Error of [`AuthorizeSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),

    /// Staff [`User`] the [`Session`] belongs to does not exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),

    /// [`Customer`] the [`Session`] belongs to does not exist.
    #[display("`Customer(phone: {_0})` does not exist")]
    #[from(ignore)]
    CustomerNotExists(#[error(not(source))] customer::Phone),
}
