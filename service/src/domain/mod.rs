//! Domain definitions.

pub mod customer;
pub mod rental;
pub mod vehicle;

pub use self::{rental::Rental, vehicle::Vehicle};
