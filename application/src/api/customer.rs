//! [`Customer`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};

use crate::{api, api::scalar, define_error, AsError, Context, Error};

/// Guest of the property.
#[derive(Clone, Debug, From)]
pub struct Customer(domain::Customer);

impl Customer {
    /// Loads the [`Customer`] with the provided phone.
    ///
    /// # Errors
    ///
    /// Errors if the [`Customer`] doesn't exist.
    pub(crate) async fn load(
        ctx: &Context,
        phone: domain::customer::Phone,
    ) -> Result<Self, Error> {
        ctx.service()
            .execute(query::customer::ByPhone::by(&phone))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .map(Self)
            .ok_or_else(|| CustomerError::NotExists.into())
            .map_err(ctx.error())
    }
}

/// Guest of the property, identified by their phone number.
#[graphql_object(context = Context)]
impl Customer {
    /// Phone number of this `Customer`, identifying them.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Customer.phone",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn phone(&self) -> Phone {
        self.0.phone.clone().into()
    }

    /// Name of this `Customer`.
    #[must_use]
    pub fn name(&self) -> Name {
        self.0.name.clone().into()
    }

    /// Email address of this `Customer`.
    #[must_use]
    pub fn email(&self) -> Option<Email> {
        self.0.email.clone().map(Into::into)
    }

    /// Additional phone number to reach this `Customer` by.
    #[must_use]
    pub fn additional_phone(&self) -> Option<Phone> {
        self.0.additional_phone.clone().map(Into::into)
    }

    /// Indicator whether this `Customer` registered themselves and may
    /// sign in.
    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.0.password_hash.is_some()
    }

    /// URL of the folder with this `Customer`'s documents.
    #[must_use]
    pub fn documents_url(&self) -> Option<scalar::Url> {
        self.0.documents_url.clone().map(Into::into)
    }

    /// URL of this `Customer`'s photo ID proof.
    #[must_use]
    pub fn photo_id_proof_url(&self) -> Option<scalar::Url> {
        self.0.photo_id_proof_url.clone().map(Into::into)
    }

    /// URLs of this `Customer`'s ID proofs.
    #[must_use]
    pub fn id_proof_urls(&self) -> Vec<scalar::Url> {
        self.0.id_proof_urls.iter().cloned().map(Into::into).collect()
    }

    /// Staff remarks about this `Customer`.
    #[must_use]
    pub fn remarks(&self) -> Option<scalar::Remarks> {
        self.0.remarks.clone().map(Into::into)
    }

    /// `DateTime` when this `Customer` was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime {
        self.0.created_at.coerce()
    }

    /// `DateTime` when this `Customer` was last modified.
    #[must_use]
    pub fn updated_at(&self) -> DateTime {
        self.0.updated_at.coerce()
    }
}

/// Phone number of a `Customer`.
///
/// Optional leading `+` followed by 7 to 20 digits, optionally separated by
/// single spaces or dashes.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CustomerPhone",
    with = scalar::Via::<domain::customer::Phone>,
)]
pub struct Phone(domain::customer::Phone);

/// Name of a `Customer`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CustomerName",
    with = scalar::Via::<domain::customer::Name>,
)]
pub struct Name(domain::customer::Name);

/// Email address of a `Customer`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "CustomerEmail",
    with = scalar::Via::<domain::customer::Email>,
)]
pub struct Email(domain::customer::Email);

define_error! {
    enum CustomerError {
        #[code = "CUSTOMER_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Customer` with the specified phone does not exist"]
        NotExists,
    }
}

pub mod list {
    //! Definitions related to [`Customer`] lists.
    //!
    //! [`Customer`]: super::Customer

    use service::{query, read::customer::list as read};

    use super::Customer;

    define_list!(
        node = Customer,
        total = query::customers::TotalCount,
        names = (
            "CustomerListCursor",
            "CustomerListEdge",
            "CustomerListConnection",
            "CustomerListPageInfo",
        ),
    );
}
