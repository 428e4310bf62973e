//! [`Command`] definition.

pub mod add_vehicle;
pub mod perform_maintenance;
pub mod rent_vehicles;
pub mod return_vehicles;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_vehicle::AddVehicle, perform_maintenance::PerformMaintenance,
    rent_vehicles::RentVehicles, return_vehicles::ReturnVehicles,
};
