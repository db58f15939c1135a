use crate::error::Result;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// A dictionary that is loaded at most once.
///
/// The `loaded` gate stays locked for the whole load, so concurrent first
/// loads run one after another and the losers see `loaded == true`. Readers
/// never touch the gate; they clone the current `Arc`.
pub(crate) struct Resource<T> {
    current: RwLock<Arc<T>>,
    loaded: Mutex<bool>,
}

impl<T> Resource<T> {
    pub(crate) fn new(initial: T) -> Self {
        Self { current: RwLock::new(Arc::new(initial)), loaded: Mutex::new(false) }
    }

    /// Runs `load` unless a previous load succeeded. Returns whether it ran.
    /// On error the current value and the flag are left untouched.
    pub(crate) fn load_with<F>(&self, load: F) -> Result<bool>
    where
        F: FnOnce() -> Result<T>,
    {
        let mut loaded = self.loaded.lock();
        if *loaded {
            return Ok(false);
        }
        let value = load()?;
        *self.current.write() = Arc::new(value);
        *loaded = true;
        Ok(true)
    }

    /// Installs `value` and marks the resource loaded.
    pub(crate) fn replace(&self, value: T) {
        let mut loaded = self.loaded.lock();
        *self.current.write() = Arc::new(value);
        *loaded = true;
    }

    pub(crate) fn is_loaded(&self) -> bool { *self.loaded.lock() }

    pub(crate) fn snapshot(&self) -> Arc<T> { Arc::clone(&self.current.read()) }
}

impl<T: Clone> Resource<T> {
    /// Mutates the current value in place (copy-on-write when snapshots are
    /// still alive). Partial changes made before `f` fails are kept.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut current = self.current.write();
        f(Arc::make_mut(&mut current))
    }
}
