//! GraphQL scalar definitions.

use std::{fmt, marker::PhantomData, str::FromStr};

use juniper::{
    GraphQLType, InputValue, ParseScalarResult, ParseScalarValue, ScalarToken,
    ScalarValue, Value,
};

/// Helper type to use in `#[graphql(with = ..)]` attribute.
///
/// Represents the target type as a GraphQL string scalar, converting it
/// to/from `As` type via its [`FromStr`]/[`Display`] impls. Domain
/// identifiers are exposed this way, so their validation rules stay in the
/// domain.
///
/// Target type must implement [`TryFrom`] and [`AsRef`] for `As` type.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Converts the target type into a string scalar [`Value`].
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::scalar(value.as_ref().to_string())
    }

    /// Constructs the target type from a string scalar [`InputValue`].
    ///
    /// # Errors
    ///
    /// If the `input` is not a string, or it doesn't represent a valid `As`
    /// or target type value.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: TryFrom<As> + GraphQLType<S, TypeInfo = ()>,
        T::Error: fmt::Display,
        S: ScalarValue,
    {
        let name = T::name(&()).unwrap_or("scalar");
        let s = input.as_string_value().ok_or_else(|| {
            format!("Cannot parse `{name}` from non-string value: {input}")
        })?;
        let value = s
            .parse::<As>()
            .map_err(|e| format!("Cannot parse `{name}` from \"{s}\": {e}"))?;
        T::try_from(value).map_err(|e| format!("Invalid `{name}`: {e}"))
    }

    /// Parses the provided [`ScalarToken`] as a string.
    ///
    /// # Errors
    ///
    /// If the token is not a string.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, FromInputValue as _, InputValue};

    use crate::api::vehicle;

    #[test]
    fn vehicle_id_is_string_scalar() {
        let id = vehicle::Id::from_input_value(&InputValue::<
            DefaultScalarValue,
        >::scalar("42"))
        .unwrap();

        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_malformed_vehicle_id() {
        let input = InputValue::<DefaultScalarValue>::scalar("forty-two");
        assert!(vehicle::Id::from_input_value(&input).is_err());

        let input = InputValue::<DefaultScalarValue>::scalar(42);
        assert!(vehicle::Id::from_input_value(&input).is_err());
    }
}
