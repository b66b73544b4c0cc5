//! [`Session`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::DateTimeOf;
use derive_more::{AsRef, Display, FromStr};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::{Customer, User};
use crate::domain::{customer, user};

/// Authenticated session of a [`Principal`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
    /// [`Principal`] this [`Session`] is issued to.
    #[serde(rename = "prn")]
    pub principal: Principal,

    /// [`DateTime`] when this [`Session`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

/// Subject a [`Session`] is issued to.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Principal {
    /// Staff [`User`].
    Staff(user::Id),

    /// [`Customer`] identified by their phone.
    Customer(customer::Phone),
}

impl Principal {
    /// Returns the [`user::Id`] if this [`Principal`] is a staff member.
    #[must_use]
    pub fn staff(&self) -> Option<user::Id> {
        match self {
            Self::Staff(id) => Some(*id),
            Self::Customer(_) => None,
        }
    }

    /// Returns the [`customer::Phone`] if this [`Principal`] is a
    /// [`Customer`].
    #[must_use]
    pub fn customer(&self) -> Option<&customer::Phone> {
        match self {
            Self::Customer(phone) => Some(phone),
            Self::Staff(_) => None,
        }
    }
}

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Debug, Display, FromStr)]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The provided `token` must be a valid [`Token`] representation.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(token: String) -> Self {
        Self(token)
    }
}

/// Marker type describing a [`Session`] expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, Expiration)>;

#[cfg(test)]
mod spec {
    use common::DateTime;

    use super::{Principal, Session};
    use crate::domain::customer;

    #[test]
    fn principal_is_tagged_in_claims() {
        let session = Session {
            principal: Principal::Customer(
                customer::Phone::new("9876543210").unwrap(),
            ),
            expires_at: DateTime::from_unix_timestamp(1_700_000_000)
                .unwrap()
                .coerce(),
        };

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "prn": {"kind": "CUSTOMER", "id": "9876543210"},
                "exp": 1_700_000_000,
            }),
        );

        let back: Session = serde_json::from_value(json).unwrap();
        assert_eq!(back.principal, session.principal);
    }
}
