//! [`Vehicle`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::domain;

use crate::{api, api::scalar, Context};

/// A vehicle of the fleet.
#[derive(Clone, Debug, From)]
pub struct Vehicle(domain::Vehicle);

/// A vehicle of the fleet.
#[graphql_object(context = Context)]
impl Vehicle {
    /// Unique identifier of this `Vehicle`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Vehicle.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// Category of this `Vehicle`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Vehicle.category",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn category(&self) -> Category {
        self.0.category.into()
    }

    /// Indicator whether this `Vehicle` is not rented at the moment.
    #[must_use]
    pub fn available(&self) -> bool {
        self.0.available
    }

    /// Indicator whether this `Vehicle` must be serviced before it can be
    /// rented again.
    #[must_use]
    pub fn needs_maintenance(&self) -> bool {
        self.0.needs_maintenance
    }

    /// Number of times this `Vehicle` was rented since its last maintenance.
    #[must_use]
    pub fn rides_since_maintenance(&self) -> i32 {
        i32::try_from(self.0.rides_since_maintenance).unwrap_or(i32::MAX)
    }

    /// Indicator whether this `Vehicle` can be rented right now.
    #[must_use]
    pub fn is_rentable(&self) -> bool {
        self.0.is_rentable()
    }
}

/// Unique identifier of a `Vehicle`.
#[derive(AsRef, Clone, Copy, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(name = "VehicleId", with = scalar::Via::<domain::vehicle::Id>)]
pub struct Id(domain::vehicle::Id);

/// Category of a `Vehicle`.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "VehicleCategory")]
pub enum Category {
    /// A regular `Vehicle`.
    Standard,

    /// An upscale `Vehicle`.
    Premium,
}

impl From<domain::vehicle::Category> for Category {
    fn from(category: domain::vehicle::Category) -> Self {
        use domain::vehicle::Category as C;
        match category {
            C::Standard => Self::Standard,
            C::Premium => Self::Premium,
        }
    }
}

impl From<Category> for domain::vehicle::Category {
    fn from(category: Category) -> Self {
        match category {
            Category::Standard => Self::Standard,
            Category::Premium => Self::Premium,
        }
    }
}

#[cfg(test)]
mod spec {
    use service::domain;

    use super::Category;

    #[test]
    fn category_roundtrips() {
        for &c in domain::vehicle::Category::ALL {
            assert_eq!(domain::vehicle::Category::from(Category::from(c)), c);
        }
    }
}
