//! Customer definitions.

use std::str::FromStr;

use derive_more::{AsRef, Display};

#[cfg(doc)]
use crate::domain::Rental;

/// ID of a customer renting [`Vehicle`]s.
///
/// Customers are not registered anywhere: any valid [`Id`] may open a
/// [`Rental`].
///
/// [`Vehicle`]: crate::domain::Vehicle
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[as_ref(str, String)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        !id.is_empty() && id.trim() == id
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid customer `Id`")
    }
}

#[cfg(test)]
mod spec {
    use super::Id;

    #[test]
    fn validates() {
        assert!(Id::new("alice").is_some());
        assert!(Id::new("C-1024").is_some());
        assert!(Id::new("x".repeat(1024)).is_some());

        assert!(Id::new("").is_none());
        assert!(Id::new(" alice").is_none());
        assert!(Id::new("alice\n").is_none());
    }
}
