//! [`Command`] for creating a new [`Customer`].

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
        customer,
        text::{Remarks, Url},
        Customer,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Customer`] by staff.
#[derive(Debug)]
pub struct CreateCustomer {
    /// [`customer::Phone`] of a new [`Customer`].
    pub phone: customer::Phone,

    /// [`customer::Name`] of a new [`Customer`].
    pub name: customer::Name,

    /// [`customer::Email`] of a new [`Customer`].
    pub email: Option<customer::Email>,

    /// [`Password`] of a new [`Customer`], if they are going to log in.
    pub password: Option<SecretBox<Password>>,

    /// Additional [`customer::Phone`] of a new [`Customer`].
    pub additional_phone: Option<customer::Phone>,

    /// [`Url`] of the folder with documents of a new [`Customer`].
    pub documents_url: Option<Url>,

    /// [`Url`] of the photo ID proof of a new [`Customer`].
    pub photo_id_proof_url: Option<Url>,

    /// [`Url`]s of the ID proofs of a new [`Customer`].
    pub id_proof_urls: Vec<Url>,

    /// [`Remarks`] about a new [`Customer`].
    pub remarks: Option<Remarks>,
}

impl<Db> Command<CreateCustomer> for Service<Db>
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
        cmd: CreateCustomer,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateCustomer {
            phone,
            name,
            email,
            password,
            additional_phone,
            documents_url,
            photo_id_proof_url,
            id_proof_urls,
            remarks,
        } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent creation of the same `Customer`.
        tx.execute(Lock(By::new(&phone)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let existing = tx
            .execute(Select(By::<Option<Customer>, _>::new(&phone)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::PhoneOccupied(phone)));
        }

        let now = DateTime::now();
        let customer = Customer {
            phone,
            name,
            email,
            password_hash: password
                .map(|p| PasswordHash::new(p.expose_secret())),
            additional_phone,
            documents_url,
            photo_id_proof_url,
            id_proof_urls,
            remarks,
            created_at: now.coerce(),
            updated_at: now.coerce(),
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

/// Error of [`CreateCustomer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`customer::Phone`] is already occupied by another [`Customer`].
    #[display("`{_0}` phone is occupied")]
    #[from(ignore)]
    PhoneOccupied(#[error(not(source))] customer::Phone),
}
