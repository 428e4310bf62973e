//! Infrastructure layer.

pub mod database;
pub mod payment;

pub use self::{
    database::{memory, Database, Memory},
    payment::Payment,
};
