//! [`Rental`] read model definitions.

use derive_more::{Display, From, Into};
use rust_decimal::Decimal;

#[cfg(doc)]
use crate::domain::Rental;

/// Wrapper around a [`Rental`] indicating that it [`is_open()`].
///
/// [`is_open()`]: Rental::is_open
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Active<T>(pub T);

/// Wrapper around a [`Rental`] indicating that it's closed and paid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Completed<T>(pub T);

/// Total amount collected for [`Completed`] [`Rental`]s.
///
/// Kept in the currency the fleet operates in.
#[derive(Clone, Copy, Debug, Default, Display, Eq, From, Into, PartialEq)]
pub struct Revenue(Decimal);

pub mod history {
    //! [`Completed`] [`Rental`]s history definitions.

    use derive_more::{Display, From, Into};

    #[cfg(doc)]
    use super::{Completed, Rental};

    /// Total count of [`Completed`] [`Rental`]s.
    #[derive(
        Clone,
        Copy,
        Debug,
        Display,
        Eq,
        From,
        Hash,
        Into,
        Ord,
        PartialEq,
        PartialOrd,
    )]
    pub struct TotalCount(usize);
}
