//! Shared ledger handle for hosts with concurrent callers.
//!
//! One `RwLock` guards the whole ledger: readers share, writers serialize.
//! Every ledger operation is short and non-blocking, so nothing finer-grained
//! is needed.

use std::sync::{Arc, PoisonError, RwLock};

use crate::clock::{Clock, SystemClock};
use crate::ledger::Ledger;

#[derive(Debug)]
pub struct SharedLedger<C = SystemClock> {
    inner: Arc<RwLock<Ledger<C>>>,
}

impl<C> Clone for SharedLedger<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> SharedLedger<C> {
    pub fn new(ledger: Ledger<C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Run `f` with shared read access.
    pub fn read<R>(&self, f: impl FnOnce(&Ledger<C>) -> R) -> R {
        // Ledger mutations cannot leave partial state behind, so a poisoned
        // lock still guards a consistent ledger.
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Run `f` with exclusive write access.
    pub fn write<R>(&self, f: impl FnOnce(&mut Ledger<C>) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl Default for SharedLedger<SystemClock> {
    fn default() -> Self {
        Self::new(Ledger::new())
    }
}
