//! # Handler Records
//!
//! One record per subscription: the callback plus the flags stamped onto it
//! at subscribe time. Flags never change after creation.

use crate::args::Args;
use crate::callback::Callback;
use parking_lot::Mutex;
use std::sync::Arc;

/// How a handler is run when its topic is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchMode {
    /// Inline on the publishing thread, under the registry lock.
    Sync,
    /// On an independent execution context; invocations may overlap.
    Async,
    /// On an independent execution context, one invocation at a time.
    Transactional,
}

impl DispatchMode {
    /// Mode for an asynchronous subscription.
    #[must_use]
    pub fn asynchronous(transactional: bool) -> Self {
        if transactional {
            Self::Transactional
        } else {
            Self::Async
        }
    }

    #[must_use]
    pub fn is_async(self) -> bool {
        !matches!(self, Self::Sync)
    }

    #[must_use]
    pub fn is_transactional(self) -> bool {
        matches!(self, Self::Transactional)
    }
}

/// A registered subscription.
pub struct HandlerRecord {
    callback: Callback,
    once: bool,
    mode: DispatchMode,
    /// Held from scheduling until completion of a transactional invocation.
    serial: Arc<Mutex<()>>,
}

impl HandlerRecord {
    #[must_use]
    pub fn new(callback: Callback, once: bool, mode: DispatchMode) -> Self {
        Self {
            callback,
            once,
            mode,
            serial: Arc::new(Mutex::new(())),
        }
    }

    #[must_use]
    pub fn callback(&self) -> &Callback {
        &self.callback
    }

    /// Removed from the registry when selected for dispatch.
    #[must_use]
    pub fn is_once(&self) -> bool {
        self.once
    }

    #[must_use]
    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Block until no other transactional invocation of this record is in
    /// flight, then hold the serialization lock until the returned guard
    /// is dropped.
    ///
    /// The guard is `Send`, so it can be acquired on the publishing thread
    /// and released by the worker that runs the invocation. Returns `None`
    /// for non-transactional records.
    pub(crate) fn acquire_serial(&self) -> Option<impl Send + 'static> {
        self.mode
            .is_transactional()
            .then(|| self.serial.lock_arc())
    }

    pub(crate) fn invoke(&self, args: &Args) {
        self.callback.invoke(args);
    }
}
