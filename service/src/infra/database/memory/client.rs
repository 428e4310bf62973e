//! [`Memory`] database clients.

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tracerr::Traced;

#[cfg(doc)]
use crate::infra::database::Memory;
use crate::infra::database::{self, memory};

use super::{Connection, State};

/// Non-transactional [`Memory`] database client.
///
/// Every operation locks the [`State`] only for its own duration.
#[derive(Clone, Debug, Default)]
pub struct NonTx {
    /// Shared [`State`] of the database.
    state: Arc<Mutex<State>>,
}

impl Connection for NonTx {
    async fn read<R>(
        &self,
        f: impl FnOnce(&State) -> R,
    ) -> Result<R, Traced<database::Error>> {
        Ok(f(&*self.state.lock().await))
    }

    async fn write<R>(
        &self,
        f: impl FnOnce(&mut State) -> R,
    ) -> Result<R, Traced<database::Error>> {
        Ok(f(&mut *self.state.lock().await))
    }
}

/// Transactional [`Memory`] database client.
///
/// Holds the [`State`] lock until committed or dropped.
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`Staged`] changes, or [`None`] once committed.
    inner: Arc<Mutex<Option<Staged>>>,
}

/// Changes staged in a [`Tx`].
#[derive(Debug)]
struct Staged {
    /// Exclusive lock of the shared [`State`].
    guard: OwnedMutexGuard<State>,

    /// Working copy of the [`State`].
    state: State,
}

impl Tx {
    /// Starts a new [`Tx`] on top of the provided [`NonTx`] client, waiting
    /// for any other [`Tx`] to finish.
    pub async fn from_non_tx(client: &NonTx) -> Self {
        let guard = Arc::clone(&client.state).lock_owned().await;
        let state = guard.clone();
        Self {
            inner: Arc::new(Mutex::new(Some(Staged { guard, state }))),
        }
    }

    /// Commits this [`Tx`], publishing its changes and releasing the lock.
    ///
    /// # Errors
    ///
    /// If this [`Tx`] is committed already.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let Staged { mut guard, state } = self
            .inner
            .lock()
            .await
            .take()
            .ok_or_else(|| tracerr::new!(memory::Error::TxFinished))
            .map_err(tracerr::map_from)?;
        *guard = state;
        Ok(())
    }
}

impl Connection for Tx {
    async fn read<R>(
        &self,
        f: impl FnOnce(&State) -> R,
    ) -> Result<R, Traced<database::Error>> {
        let staged = self.inner.lock().await;
        let Staged { state, .. } = staged
            .as_ref()
            .ok_or_else(|| tracerr::new!(memory::Error::TxFinished))
            .map_err(tracerr::map_from)?;
        Ok(f(state))
    }

    async fn write<R>(
        &self,
        f: impl FnOnce(&mut State) -> R,
    ) -> Result<R, Traced<database::Error>> {
        let mut staged = self.inner.lock().await;
        let Staged { state, .. } = staged
            .as_mut()
            .ok_or_else(|| tracerr::new!(memory::Error::TxFinished))
            .map_err(tracerr::map_from)?;
        Ok(f(state))
    }
}
