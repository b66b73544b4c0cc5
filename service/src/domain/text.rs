//! Free-form text values shared by multiple entities.

use derive_more::{AsRef, Display, FromStr};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

/// Maximum length of a free-form text value in characters.
const MAX_LEN: usize = 500;

/// Checks whether the given `text` is a valid free-form text value.
fn is_valid(text: &str) -> bool {
    text.trim() == text && !text.is_empty() && text.chars().count() <= MAX_LEN
}

/// Human-readable description of an entity.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(forward)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        is_valid(&text).then_some(Self(text))
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

/// Staff or customer remarks attached to an entity.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(forward)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Remarks(String);

impl Remarks {
    /// Creates new [`Remarks`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates new [`Remarks`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        is_valid(&text).then_some(Self(text))
    }
}

impl FromStr for Remarks {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Remarks`")
    }
}

/// Link to an externally stored document (ID proof, payment screenshot,
/// invoice PDF and the like).
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(forward)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Url(String);

impl Url {
    /// Creates a new [`Url`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `url` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Creates a new [`Url`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Checks whether the given `url` is a valid [`Url`].
    fn check(url: &str) -> bool {
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));
        url.len() <= MAX_LEN
            && rest.is_some_and(|r| {
                !r.is_empty() && !r.chars().any(char::is_whitespace)
            })
    }
}

impl FromStr for Url {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Url`")
    }
}

#[cfg(test)]
mod spec {
    use super::{Description, Remarks, Url};

    #[test]
    fn text_bounds() {
        assert!(Remarks::new("late arrival").is_some());
        assert!(Remarks::new("").is_none());
        assert!(Remarks::new(" padded").is_none());
        assert!(Description::new("x".repeat(500)).is_some());
        assert!(Description::new("x".repeat(501)).is_none());
    }

    #[test]
    fn url_format() {
        assert!(Url::new("https://files.example.com/id/42.png").is_some());
        assert!(Url::new("http://x").is_some());
        assert!(Url::new("ftp://x").is_none());
        assert!(Url::new("https://").is_none());
        assert!(Url::new("https://a b").is_none());
    }
}
