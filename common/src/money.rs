//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Number of fractional digits every [`Currency`] is settled with.
    pub const PRECISION: u32 = 2;

    /// Creates zero [`Money`] in the provided [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::from_parts(0, 0, 0, false, Self::PRECISION),
            currency,
        }
    }

    /// Creates a new [`Money`] rounding the provided `amount` to the
    /// [`Money::PRECISION`].
    ///
    /// Midpoints are rounded to the nearest even digit.
    #[must_use]
    pub fn rounded(amount: Decimal, currency: Currency) -> Self {
        let mut amount = amount.round_dp_with_strategy(
            Self::PRECISION,
            RoundingStrategy::MidpointNearestEven,
        );
        amount.rescale(Self::PRECISION);
        Self { amount, currency }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        write!(f, "{amount}{currency}")
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "Pound Sterling."]
        Gbp = 3,
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("56.00USD").unwrap(),
            Money {
                amount: decimal("56.00"),
                currency: Currency::Usd,
            },
        );
        assert_eq!(
            Money::from_str("7.5GBP").unwrap(),
            Money {
                amount: decimal("7.5"),
                currency: Currency::Gbp,
            },
        );

        assert!(Money::from_str("600").is_err());
        assert!(Money::from_str("600Eu").is_err());
        assert!(Money::from_str("600Euros").is_err());
        assert!(Money::from_str("600EUR").is_ok());
    }

    #[test]
    fn to_string_keeps_cents() {
        assert_eq!(
            Money::rounded(decimal("7.5"), Currency::Usd).to_string(),
            "7.50USD",
        );
        assert_eq!(
            Money::rounded(decimal("56"), Currency::Usd).to_string(),
            "56.00USD",
        );
        assert_eq!(
            Money::rounded(decimal("600"), Currency::Eur).to_string(),
            "600.00EUR",
        );
        assert_eq!(Money::zero(Currency::Usd).to_string(), "0.00USD");
    }

    #[test]
    fn rounds_to_cents() {
        let cases = [
            ("56.000000000", "56.00"),
            ("12.344", "12.34"),
            ("12.346", "12.35"),
            ("0.125", "0.12"),
            ("0.135", "0.14"),
        ];
        for (raw, expected) in cases {
            assert_eq!(
                Money::rounded(decimal(raw), Currency::Usd).amount,
                decimal(expected),
                "rounding {raw}",
            );
        }
    }
}
