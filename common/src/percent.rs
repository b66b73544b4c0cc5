//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::Decimal;

/// Floating-point percentage.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided values is
    /// greater than `0` and less than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val > Decimal::ONE_HUNDRED {
            None
        } else {
            #[expect(
                clippy::allow_attributes,
                reason = "TODO: Remove once clippy is fixed"
            )]
            #[allow(unsafe_code, reason = "invariants checked already")]
            Some(unsafe { Self::new_unchecked(val) })
        }
    }

    /// Calculates the share of `part` in `whole` as a [`Percent`] rounded to
    /// two decimal places.
    ///
    /// Zero `whole` results in zero [`Percent`]. The `part` exceeding the
    /// `whole` is clamped to `100`.
    #[must_use]
    pub fn ratio(part: u64, whole: u64) -> Self {
        if whole == 0 {
            return Self(Decimal::ZERO);
        }
        let part = Decimal::from(part.min(whole));
        Self(
            (part * Decimal::ONE_HUNDRED / Decimal::from(whole))
                .round_dp(2)
                .normalize(),
        )
    }

    /// Returns the [`Decimal`] value of this [`Percent`].
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Creates a new [`Percent`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must be greater than `0` and less than `100`.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(val: Decimal) -> Self {
        Self(val)
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Floating-point percentage.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Percent = super::Percent;

    impl Percent {
        fn to_output<S: ScalarValue>(m: &Percent) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Percent` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Percent` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    use super::Percent;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn ratio() {
        assert_eq!(Percent::ratio(0, 0).value(), Decimal::ZERO);
        assert_eq!(Percent::ratio(3, 0).value(), Decimal::ZERO);
        assert_eq!(Percent::ratio(1, 4).value(), decimal("25"));
        assert_eq!(Percent::ratio(2, 3).value(), decimal("66.67"));
        assert_eq!(Percent::ratio(4, 4).value(), decimal("100"));
        assert_eq!(Percent::ratio(5, 4).value(), decimal("100"));
        assert_eq!(Percent::ratio(1, 3).to_string(), "33.33");
    }

    proptest! {
        #[test]
        fn ratio_stays_in_bounds(part in 0_u64..10_000, whole in 0_u64..10_000) {
            let p = Percent::ratio(part, whole).value();

            prop_assert!(p >= Decimal::ZERO);
            prop_assert!(p <= Decimal::ONE_HUNDRED);
            prop_assert!(Percent::new(p).is_some());
        }
    }
}
