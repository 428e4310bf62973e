//! In-memory [`Database`] implementation.
//!
//! The whole fleet [`State`] lives behind a single lock. A [`Tx`] holds that
//! lock for its entire lifetime and works on a staged copy of the [`State`],
//! which is published on commit and discarded if the [`Tx`] is dropped
//! uncommitted.

pub mod client;
mod impls;

use std::{collections::HashMap, future::Future};

use derive_more::{Deref, Display, Error as StdError};
use rust_decimal::Decimal;
use tracerr::Traced;

use crate::{
    domain::{customer, vehicle, Rental, Vehicle},
    infra::database,
};
#[cfg(doc)]
use crate::infra::Database;

pub use self::client::{NonTx, Tx};

/// In-memory [`Database`] client.
#[derive(Clone, Debug, Default, Deref)]
pub struct Memory<T = NonTx>(T);

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Fleet state stored in a [`Memory`] database.
#[derive(Clone, Debug, Default)]
pub struct State {
    /// All the [`Vehicle`]s of the fleet, ordered by their IDs.
    vehicles: Vec<Vehicle>,

    /// Open [`Rental`]s by their customers.
    active: HashMap<customer::Id, Rental>,

    /// Closed and paid [`Rental`]s, in completion order.
    history: Vec<Rental>,

    /// Total amount collected for the [`Rental`]s in the `history`.
    revenue: Decimal,
}

impl State {
    /// Returns the [`Vehicle`] with the provided ID, if any.
    fn vehicle_mut(&mut self, id: vehicle::Id) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|v| v.id == id)
    }
}

/// [`Memory`] database [`Error`].
///
/// [`Error`]: std::error::Error
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// [`Tx`] was committed already.
    #[display("`Tx` is committed already")]
    TxFinished,

    /// Updated [`Vehicle`] is not stored.
    #[display("`Vehicle(id: {_0})` is not stored")]
    VehicleNotStored(#[error(not(source))] vehicle::Id),

    /// Inserted [`Vehicle`] breaks the IDs order.
    #[display("`Vehicle(id: {_0})` is out of the IDs order")]
    VehicleOutOfOrder(#[error(not(source))] vehicle::Id),
}

/// Access to the [`State`] of a [`Memory`] database.
pub trait Connection {
    /// Reads the [`State`] with the provided function.
    ///
    /// # Errors
    ///
    /// If the [`State`] is not accessible.
    fn read<R>(
        &self,
        f: impl FnOnce(&State) -> R,
    ) -> impl Future<Output = Result<R, Traced<database::Error>>>;

    /// Modifies the [`State`] with the provided function.
    ///
    /// # Errors
    ///
    /// If the [`State`] is not accessible.
    fn write<R>(
        &self,
        f: impl FnOnce(&mut State) -> R,
    ) -> impl Future<Output = Result<R, Traced<database::Error>>>;
}
