//! Marker types of storage and gateway operations.
//!
//! Each marker wraps the operation argument, so a single [`Handler`] type can
//! implement many operations, distinguished by the argument type only.

use std::marker::PhantomData;

use crate::Handler;

/// Stores a new record.
#[derive(Clone, Copy, Debug)]
pub struct Insert<T>(pub T);

/// Overwrites an existing record.
#[derive(Clone, Copy, Debug)]
pub struct Update<T>(pub T);

/// Removes a record.
#[derive(Clone, Copy, Debug)]
pub struct Delete<T>(pub T);

/// Reads records described by the wrapped selector (usually a [`By`]).
#[derive(Clone, Copy, Debug)]
pub struct Select<T>(pub T);

/// Asks an external gateway to approve the wrapped value, like a charge of
/// some [`Money`] amount.
///
/// [`Money`]: crate::Money
#[derive(Clone, Copy, Debug)]
pub struct Authorize<T>(pub T);

/// Opens a transaction.
#[derive(Clone, Copy, Debug)]
pub struct Transact;

/// Handle of a transaction opened by `T`.
pub type Transacted<T> = <T as Handler<Transact>>::Ok;

/// Publishes everything staged in a transaction.
///
/// A transaction dropped without being committed discards its changes.
#[derive(Clone, Copy, Debug)]
pub struct Commit;

/// Selector of `W` records by the `B` key.
#[derive(Clone, Copy, Debug)]
pub struct By<W, B> {
    /// Type of the selected records.
    _what: PhantomData<W>,

    /// Key to select records by.
    by: B,
}

impl<W, B> By<W, B> {
    /// Creates a new [`By`] selector with the provided key.
    #[must_use]
    pub fn new(by: B) -> Self {
        Self {
            _what: PhantomData,
            by,
        }
    }

    /// Returns the key of this [`By`] selector.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.by
    }
}
