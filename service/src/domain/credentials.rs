//! Credentials definitions.

use derive_more::{Display, From};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use secrecy::{zeroize::Zeroize, CloneableSecret};
use sha2::{Digest as _, Sha256};
use uuid::Uuid;

/// Plain-text password of a staff member or a customer.
#[derive(Clone, Debug, Display, Eq, From, PartialEq)]
#[from(&str, String)]
pub struct Password(String);

impl Password {
    /// Creates a new [`Password`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `password` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Creates a new [`Password`] if the given `password` is valid.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        Self::check(&password).then_some(Self(password))
    }

    /// Checks whether the given `password` is a valid [`Password`].
    fn check(password: impl AsRef<str>) -> bool {
        let password = password.as_ref();
        password.len() >= 6 && password.len() <= 128
    }
}

impl std::str::FromStr for Password {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Password`")
    }
}

impl CloneableSecret for Password {}
impl Zeroize for Password {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Salted SHA-256 digest of a [`Password`].
///
/// Stored as `{salt}${digest}`, both hex-encoded, with a random UUID salt
/// generated for every new [`PasswordHash`].
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Creates a new [`PasswordHash`] from the given [`Password`] with a fresh
    /// random salt.
    #[must_use]
    pub fn new(password: &Password) -> Self {
        Self::salted(&Uuid::new_v4().simple().to_string(), password)
    }

    /// Hashes the given [`Password`] with the provided hex-encoded `salt`.
    fn salted(salt: &str, password: &Password) -> Self {
        let digest = Sha256::new()
            .chain_update(salt.as_bytes())
            .chain_update(password.0.as_bytes())
            .finalize();
        Self(format!("{salt}${digest:x}"))
    }

    /// Checks whether the provided [`Password`] matches this [`PasswordHash`].
    #[must_use]
    pub fn verify(&self, password: &Password) -> bool {
        self.0
            .split_once('$')
            .is_some_and(|(salt, _)| *self == Self::salted(salt, password))
    }
}

#[cfg(test)]
mod spec {
    use super::{Password, PasswordHash};

    #[test]
    fn verifies_only_matching_password() {
        let hash = PasswordHash::new(&Password::new("s3cret!").unwrap());

        assert!(hash.verify(&Password::new("s3cret!").unwrap()));
        assert!(!hash.verify(&Password::new("s3cret?").unwrap()));
        assert_eq!(hash.to_string().len(), 32 + 1 + 64);
    }

    #[test]
    fn same_password_gets_different_salts() {
        let password = Password::new("s3cret!").unwrap();
        let first = PasswordHash::new(&password);
        let second = PasswordHash::new(&password);

        assert_ne!(first, second);
        assert!(first.verify(&password));
        assert!(second.verify(&password));
    }

    #[test]
    fn unsalted_hash_never_verifies() {
        let hash = PasswordHash("0".repeat(64));

        assert!(!hash.verify(&Password::new("s3cret!").unwrap()));
    }

    #[test]
    fn length_bounds() {
        assert!(Password::new("12345").is_none());
        assert!(Password::new("123456").is_some());
        assert!(Password::new("x".repeat(129)).is_none());
    }
}
