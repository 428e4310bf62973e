//! GraphQL API definitions.

mod mutation;
mod query;
pub mod rental;
pub mod report;
pub mod scalar;
pub mod vehicle;

use juniper::EmptySubscription;

use crate::Context;

pub use self::{
    mutation::Mutation, query::Query, rental::Rental, vehicle::Vehicle,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;

/// Creates a new [`Schema`].
#[must_use]
pub fn schema() -> Schema {
    Schema::new(Query, Mutation, EmptySubscription::new())
}

#[cfg(test)]
mod spec {
    #[test]
    fn exposes_fleet_operations() {
        let sdl = super::schema().as_sdl();

        for field in [
            "availableVehicles",
            "rentVehicles",
            "returnVehicles",
            "report",
            "performMaintenance",
            "rentalHistory",
        ] {
            assert!(sdl.contains(field), "missing `{field}` in schema");
        }
    }
}
