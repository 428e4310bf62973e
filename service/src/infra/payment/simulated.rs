//! Simulated [`Payment`] gateway.

use std::convert::Infallible;

use common::{operations::Authorize, Money};
use rand::Rng as _;
use tracing as log;

use super::Payment;

/// [`Payment`] gateway approving payments randomly with the configured
/// probability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Simulated {
    /// Probability of a payment to be approved, within `[0, 1]` range.
    approval_rate: f64,
}

impl Simulated {
    /// Default probability of a payment to be approved.
    pub const DEFAULT_APPROVAL_RATE: f64 = 0.95;

    /// Creates a new [`Simulated`] gateway, if the provided `approval_rate`
    /// is a probability within `[0, 1]` range.
    #[must_use]
    pub fn new(approval_rate: f64) -> Option<Self> {
        (0.0..=1.0)
            .contains(&approval_rate)
            .then_some(Self { approval_rate })
    }
}

impl Payment<Authorize<Money>> for Simulated {
    type Ok = bool;
    type Err = Infallible;

    async fn execute(
        &self,
        Authorize(amount): Authorize<Money>,
    ) -> Result<Self::Ok, Self::Err> {
        let approved = rand::thread_rng().gen_bool(self.approval_rate);
        log::debug!("simulated payment of {amount}: approved={approved}");
        Ok(approved)
    }
}

#[cfg(test)]
mod spec {
    use common::{operations::Authorize, Currency, Money};

    use crate::infra::Payment as _;

    use super::Simulated;

    #[test]
    fn validates_approval_rate() {
        assert!(Simulated::new(0.0).is_some());
        assert!(Simulated::new(0.5).is_some());
        assert!(Simulated::new(1.0).is_some());

        assert!(Simulated::new(-0.1).is_none());
        assert!(Simulated::new(1.1).is_none());
        assert!(Simulated::new(f64::NAN).is_none());
    }

    #[tokio::test]
    async fn extreme_rates_are_deterministic() {
        let amount = Money::zero(Currency::Usd);

        let always = Simulated::new(1.0).unwrap();
        let never = Simulated::new(0.0).unwrap();
        for _ in 0..20 {
            assert!(always.execute(Authorize(amount)).await.unwrap());
            assert!(!never.execute(Authorize(amount)).await.unwrap());
        }
    }
}
