//! [`Command`] for updating a [`Customer`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
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

/// [`Command`] for updating a [`Customer`].
///
/// [`None`] fields are left untouched. The [`customer::Phone`] identifying
/// the [`Customer`] never changes.
#[derive(Debug)]
pub struct UpdateCustomer {
    /// [`customer::Phone`] of the [`Customer`] to update.
    pub phone: customer::Phone,

    /// New [`customer::Name`] of the [`Customer`].
    pub name: Option<customer::Name>,

    /// New [`customer::Email`] of the [`Customer`], or its removal.
    pub email: Option<Option<customer::Email>>,

    /// New [`Password`] of the [`Customer`].
    pub password: Option<SecretBox<Password>>,

    /// New additional [`customer::Phone`] of the [`Customer`], or its
    /// removal.
    pub additional_phone: Option<Option<customer::Phone>>,

    /// New documents folder [`Url`] of the [`Customer`], or its removal.
    pub documents_url: Option<Option<Url>>,

    /// New photo ID proof [`Url`] of the [`Customer`], or its removal.
    pub photo_id_proof_url: Option<Option<Url>>,

    /// New ID proof [`Url`]s of the [`Customer`].
    pub id_proof_urls: Option<Vec<Url>>,

    /// New [`Remarks`] about the [`Customer`], or their removal.
    pub remarks: Option<Option<Remarks>>,
}

impl UpdateCustomer {
    /// Creates a new [`UpdateCustomer`] leaving everything untouched.
    #[must_use]
    pub fn new(phone: customer::Phone) -> Self {
        Self {
            phone,
            name: None,
            email: None,
            password: None,
            additional_phone: None,
            documents_url: None,
            photo_id_proof_url: None,
            id_proof_urls: None,
            remarks: None,
        }
    }
}

impl<Db> Command<UpdateCustomer> for Service<Db>
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
        > + Database<Update<Customer>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Customer;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateCustomer,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateCustomer {
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

        // Avoid concurrent actions upon the same `Customer`.
        tx.execute(Lock(By::new(&phone)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut customer = tx
            .execute(Select(By::<Option<Customer>, _>::new(&phone)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::CustomerNotExists(phone.clone()))
            .map_err(tracerr::wrap!())?;

        if let Some(name) = name {
            customer.name = name;
        }
        if let Some(email) = email {
            customer.email = email;
        }
        if let Some(password) = password {
            customer.password_hash =
                Some(PasswordHash::new(password.expose_secret()));
        }
        if let Some(additional_phone) = additional_phone {
            customer.additional_phone = additional_phone;
        }
        if let Some(url) = documents_url {
            customer.documents_url = url;
        }
        if let Some(url) = photo_id_proof_url {
            customer.photo_id_proof_url = url;
        }
        if let Some(urls) = id_proof_urls {
            customer.id_proof_urls = urls;
        }
        if let Some(remarks) = remarks {
            customer.remarks = remarks;
        }
        customer.updated_at = DateTime::now().coerce();

        tx.execute(Update(customer.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(customer)
    }
}

/// Error of [`UpdateCustomer`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Customer`] doesn't exist.
    #[display("`Customer(phone: {_0})` does not exist")]
    #[from(ignore)]
    CustomerNotExists(#[error(not(source))] customer::Phone),
}
