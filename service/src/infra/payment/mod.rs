//! [`Payment`]-related implementations.

#[cfg(feature = "simulated-payment")]
mod simulated;

use std::convert::Infallible;

use common::{operations::Authorize, Money};
use tracing as log;

#[cfg(feature = "simulated-payment")]
pub use self::simulated::Simulated;

/// Payment operation.
///
/// Authorizing [`Money`] resolves to `true` if the amount is approved, or to
/// `false` if it's declined. Declines are not errors: the caller may retry.
pub use common::Handler as Payment;

/// [`Payment`] gateway always resolving with the same outcome.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fixed(pub bool);

impl Payment<Authorize<Money>> for Fixed {
    type Ok = bool;
    type Err = Infallible;

    async fn execute(
        &self,
        Authorize(amount): Authorize<Money>,
    ) -> Result<Self::Ok, Self::Err> {
        log::debug!("payment of {amount} resolved: approved={}", self.0);
        Ok(self.0)
    }
}
