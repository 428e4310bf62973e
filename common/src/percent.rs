//! [`Percent`]-related definitions.

use derive_more::Display;
use rust_decimal::Decimal;

/// Floating-point percentage.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided values is
    /// not less than `0` and not greater than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Decimal::ONE_HUNDRED)
            .contains(&val)
            .then_some(Self(val))
    }

    /// Returns the fraction of a whole this [`Percent`] represents, in the
    /// `[0..1]` range.
    #[must_use]
    pub fn ratio(self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Reduces the provided `amount` by this [`Percent`].
    #[must_use]
    pub fn off(self, amount: Decimal) -> Decimal {
        amount * (Decimal::ONE - self.ratio())
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn bounds() {
        assert!(Percent::new(Decimal::ZERO).is_some());
        assert!(Percent::new(Decimal::ONE_HUNDRED).is_some());
        assert!(Percent::new(Decimal::NEGATIVE_ONE).is_none());
        assert!(Percent::new(Decimal::from(101)).is_none());
    }

    #[test]
    fn off() {
        let thirty = Percent::new(Decimal::from(30)).unwrap();

        assert_eq!(thirty.off(Decimal::from(80)), Decimal::from(56));
        assert_eq!(thirty.off(Decimal::ZERO), Decimal::ZERO);
    }
}
