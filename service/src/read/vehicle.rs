//! [`Vehicle`] read model definitions.

use derive_more::{Display, From, Into};

#[cfg(doc)]
use crate::domain::Vehicle;

/// Wrapper around a [`Vehicle`] indicating that it [`is_rentable()`].
///
/// [`is_rentable()`]: Vehicle::is_rentable
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Available<T>(pub T);

/// Total count of [`Vehicle`]s in the fleet.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, Hash, Into, Ord, PartialEq, PartialOrd,
)]
pub struct TotalCount(usize);
