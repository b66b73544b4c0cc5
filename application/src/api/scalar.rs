//! GraphQL scalar definitions.

use std::{fmt, marker::PhantomData, str::FromStr};

use derive_more::{AsRef, Display, From, Into};
use juniper::{
    GraphQLScalar, GraphQLType, InputValue, ParseScalarResult,
    ParseScalarValue, ScalarToken, ScalarValue, Value,
};
use service::domain::{self, room::configuration};

/// Helper type to use in `#[graphql(with = ..)]` attribute.
///
/// Uses [`FromStr`]/[`Display`] impls of `As` type to convert the target type
/// to/from GraphQL scalar.
///
/// Target type must implement [`TryFrom`] and [`AsRef`] for `As` type.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Convert the target type into scalar [`Value`] by using [`Display`] impl
    /// of `As` type.
    ///
    /// [`Display`]: fmt::Display
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Constructs the target type from scalar [`Value`] by using [`FromStr`]
    /// impl of `As` type.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the input value is not a string;
    /// - the input value cannot be parsed into `As` type;
    /// - the parsed value cannot be converted into the target type.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr + fmt::Display,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let s = input.as_string_value().ok_or_else(|| {
            format!(
                "Cannot parse input scalar `{}`: expected string input \
                 value, found: {input}",
                T::name(&()).expect("always has a name"),
            )
        })?;
        s.parse::<As>()
            .map_err(|e| {
                format!(
                    "Cannot parse input scalar `{}` from \"{s}\" string: {e}",
                    T::name(&()).expect("always has a name"),
                )
            })?
            .try_into()
            .map_err(|e| {
                format!(
                    "Cannot parse input scalar `{}`: {e}",
                    T::name(&()).expect("always has a name"),
                )
            })
    }

    /// Parse the provided [`ScalarToken`].
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be parsed as [`String`].
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

/// Free-form description.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = Via::<domain::text::Description>)]
pub struct Description(domain::text::Description);

/// Free-form remarks.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = Via::<domain::text::Remarks>)]
pub struct Remarks(domain::text::Remarks);

/// URL of an externally stored document.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = Via::<domain::text::Url>)]
pub struct Url(domain::text::Url);

/// Password of a `User` or a `Customer`.
#[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
#[graphql(with = Via::<domain::credentials::Password>)]
pub struct Password(domain::credentials::Password);

impl Password {
    /// Wraps this [`Password`] into a [`secrecy::SecretBox`].
    #[must_use]
    pub fn into_secret(
        self,
    ) -> secrecy::SecretBox<domain::credentials::Password> {
        secrecy::SecretBox::init_with(move || self.0)
    }
}

/// Number of people staying in a `Room`, from 1 to 16.
#[derive(Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(with = Self, parse_token(i32))]
pub struct PersonCount(configuration::PersonCount);

impl PersonCount {
    fn to_output<S: ScalarValue>(count: &PersonCount) -> Value<S> {
        Value::scalar(i32::from(count.0.get()))
    }

    fn from_input<S: ScalarValue>(
        input: &InputValue<S>,
    ) -> Result<Self, String> {
        input
            .as_int_value()
            .and_then(configuration::PersonCount::new)
            .map(Self)
            .ok_or_else(|| {
                format!(
                    "Cannot parse `PersonCount` input scalar: expected an \
                     integer from 1 to {}, found: {input}",
                    configuration::PersonCount::MAX,
                )
            })
    }
}
