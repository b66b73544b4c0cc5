//! [`FuzzPattern`] definition.

use derive_more::Display;
use itertools::Itertools as _;
use postgres_types::{FromSql, ToSql};

/// Characters having a special meaning in a `SIMILAR TO` pattern.
const SPECIAL_CHARS: &str = r"\%|*+?{}()[]_";

/// `SIMILAR TO` pattern matching any of the words of a search input.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct FuzzPattern(String);

impl FuzzPattern {
    /// Creates a new [`FuzzPattern`] out of the given `input`.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self(format!(
            "({})",
            input
                .split_ascii_whitespace()
                .format_with("|", |word, f| f(&format_args!("%{}%", escape(word)))),
        ))
    }
}

/// Escapes the [`SPECIAL_CHARS`] in the provided `word`.
fn escape(word: &str) -> String {
    word.chars().fold(String::with_capacity(word.len()), |mut out, c| {
        if SPECIAL_CHARS.contains(c) {
            out.push('\\');
        }
        out.push(c);
        out
    })
}

#[cfg(test)]
mod spec {
    use super::FuzzPattern;

    #[test]
    fn matches_any_word() {
        assert_eq!(
            FuzzPattern::new("  John   Doe ").to_string(),
            "(%John%|%Doe%)",
        );
    }

    #[test]
    fn escapes_special_chars() {
        assert_eq!(
            FuzzPattern::new("50%_off (a|b)").to_string(),
            r"(%50\%\_off%|%\(a\|b\)%)",
        );
    }
}
