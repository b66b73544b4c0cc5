//! [`Command`] for registering a [`Customer`].

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use tracerr::Traced;

use crate::{
    domain::{
        credentials::{Password, PasswordHash},
        customer, Customer,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for a [`Customer`] registering themselves.
///
/// A [`Customer`] recorded by staff earlier and having no [`Password`] yet is
/// claimed by the registration, keeping all the recorded details.
#[derive(Debug)]
pub struct RegisterCustomer {
    /// [`customer::Phone`] of the [`Customer`].
    pub phone: customer::Phone,

    /// [`customer::Name`] of the [`Customer`].
    pub name: customer::Name,

    /// [`customer::Email`] of the [`Customer`].
    pub email: Option<customer::Email>,

    /// [`Password`] of the [`Customer`].
    pub password: SecretBox<Password>,
}

impl<Db> Command<RegisterCustomer> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: for<'p> Database<
            Lock<By<Customer, &'p customer::Phone>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + for<'p> Database<
            Select<By<Option<Customer>, &'p customer::Phone>>,
            Ok = Option<Customer>,
            Err = Traced<database::Error>,
        > + Database<Insert<Customer>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Customer;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: RegisterCustomer,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RegisterCustomer {
            phone,
            name,
            email,
            password,
        } = cmd;
        let password_hash = PasswordHash::new(password.expose_secret());

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent registration of the same `Customer`.
        tx.execute(Lock(By::new(&phone)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let existing = tx
            .execute(Select(By::<Option<Customer>, _>::new(&phone)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let now = DateTime::now();
        let customer = match existing {
            Some(c) if c.password_hash.is_some() => {
                return Err(tracerr::new!(E::AlreadyRegistered(phone)));
            }
            Some(mut c) => {
                c.name = name;
                c.email = email.or(c.email);
                c.password_hash = Some(password_hash);
                c.updated_at = now.coerce();
                c
            }
            None => Customer {
                phone,
                name,
                email,
                password_hash: Some(password_hash),
                additional_phone: None,
                documents_url: None,
                photo_id_proof_url: None,
                id_proof_urls: vec![],
                remarks: None,
                created_at: now.coerce(),
                updated_at: now.coerce(),
            },
        };

        tx.execute(Insert(customer.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(customer)
    }
}

/// Error of [`RegisterCustomer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Customer`] with the [`customer::Phone`] has registered already.
    #[display("`Customer(phone: {_0})` is registered already")]
    #[from(ignore)]
    AlreadyRegistered(#[error(not(source))] customer::Phone),
}
