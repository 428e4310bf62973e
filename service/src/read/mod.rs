//! Read entities definitions.

pub mod rental;
pub mod vehicle;
