//! [`Customer`] definitions.

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, FromStr};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{
    credentials::PasswordHash,
    text::{Remarks, Url},
};

/// Guest of the property, identified by their phone number.
#[derive(Clone, Debug)]
pub struct Customer {
    /// [`Phone`] of this [`Customer`], identifying them.
    pub phone: Phone,

    /// [`Name`] of this [`Customer`].
    pub name: Name,

    /// [`Email`] of this [`Customer`].
    pub email: Option<Email>,

    /// [`PasswordHash`] of this [`Customer`], if they registered themselves.
    pub password_hash: Option<PasswordHash>,

    /// Additional [`Phone`] to reach this [`Customer`] by.
    pub additional_phone: Option<Phone>,

    /// [`Url`] of the folder with this [`Customer`]'s documents.
    pub documents_url: Option<Url>,

    /// [`Url`] of this [`Customer`]'s photo ID proof.
    pub photo_id_proof_url: Option<Url>,

    /// [`Url`]s of this [`Customer`]'s ID proofs.
    pub id_proof_urls: Vec<Url>,

    /// Staff [`Remarks`] about this [`Customer`].
    pub remarks: Option<Remarks>,

    /// [`DateTime`] when this [`Customer`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Customer`] was last modified.
    pub updated_at: ModificationDateTime,
}

/// Phone number of a [`Customer`].
///
/// Identifies a [`Customer`] uniquely.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(forward)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `number` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    fn check(number: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Phone`] format:
        /// - Optional leading `+`;
        /// - Digits, optionally separated by single spaces or dashes;
        /// - Between 7 and 20 characters long.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\+?\d(?:[-\s]?\d){5,17}$").expect("valid regex")
        });

        let number = number.as_ref();
        number.len() <= 20 && REGEX.is_match(number)
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

impl TryFrom<String> for Phone {
    type Error = &'static str;

    fn try_from(number: String) -> Result<Self, Self::Error> {
        Self::new(number).ok_or("invalid `Phone`")
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}

/// Name of a [`Customer`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(forward)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.chars().count() <= 128
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Email address of a [`Customer`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(forward)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `address` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^@\s]+@[^@\s.]+(?:\.[^@\s.]+)+$")
                .expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 254 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// [`DateTime`] when a [`Customer`] was created.
pub type CreationDateTime = DateTimeOf<(Customer, unit::Creation)>;

/// [`DateTime`] when a [`Customer`] was last modified.
pub type ModificationDateTime = DateTimeOf<(Customer, unit::Modification)>;

#[cfg(test)]
mod spec {
    use super::{Email, Phone};

    #[test]
    fn phone_format() {
        assert!(Phone::new("9876543210").is_some());
        assert!(Phone::new("+91 98765-43210").is_some());
        assert!(Phone::new("+1-202-555-0143").is_some());
        assert!(Phone::new("12345").is_none());
        assert!(Phone::new("98765 43210 ").is_none());
        assert!(Phone::new("98--76543210").is_none());
        assert!(Phone::new("phone").is_none());
        assert!(Phone::new("1".repeat(21)).is_none());
    }

    #[test]
    fn phone_serde_validates() {
        let phone: Phone = serde_json::from_str("\"9876543210\"").unwrap();
        assert_eq!(AsRef::<str>::as_ref(&phone), "9876543210");
        assert!(serde_json::from_str::<Phone>("\"x\"").is_err());
    }

    #[test]
    fn email_format() {
        assert!(Email::new("guest@example.com").is_some());
        assert!(Email::new("guest@localhost").is_none());
        assert!(Email::new("guest@@example.com").is_none());
    }
}
