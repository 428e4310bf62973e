//! Fleet report definitions.

use common::Money;
use derive_more::From;
use juniper::graphql_object;
use service::query;

use crate::{api, Context};

/// Snapshot report of the fleet state.
#[derive(Clone, Copy, Debug, From)]
pub struct Fleet(query::report::Output);

/// Converts the provided count into a GraphQL `Int`, saturating on overflow.
fn int(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// Snapshot report of the fleet state.
#[graphql_object(name = "FleetReport", context = Context)]
impl Fleet {
    /// Total number of `Vehicle`s in the fleet.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "FleetReport.totalVehicles",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[must_use]
    pub fn total_vehicles(&self) -> i32 {
        int(self.0.total_vehicles)
    }

    /// Number of `Vehicle`s that can be rented right now.
    #[must_use]
    pub fn available_vehicles(&self) -> i32 {
        int(self.0.available_vehicles)
    }

    /// Number of `Vehicle`s flagged for maintenance.
    #[must_use]
    pub fn vehicles_in_maintenance(&self) -> i32 {
        int(self.0.vehicles_in_maintenance)
    }

    /// Total amount collected for completed `Rental`s.
    #[must_use]
    pub fn revenue(&self) -> Money {
        self.0.revenue
    }

    /// Number of completed and paid `Rental`s.
    #[must_use]
    pub fn completed_rentals(&self) -> i32 {
        int(self.0.completed_rentals)
    }
}
