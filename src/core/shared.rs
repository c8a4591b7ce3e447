use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A thread-safe, reference-counted state container with read-write locking.
///
/// `Shared` holds state that the simulation loop mutates and the render loop
/// reads, such as the session configuration. It uses an `Arc<RwLock<T>>`
/// internally: reads can occur concurrently, writes are exclusive.
///
/// A reader that needs several fields observed together (for example the
/// match target and the highlight color) should take one guard, or for
/// `Copy` types call [`Shared::copied`], so the whole value is seen
/// atomically rather than field by field across two lock acquisitions.
pub struct Shared<T> {
    state: Arc<RwLock<T>>,
}

impl<T> Shared<T> {
    /// Creates a new `Shared` containing the given value.
    pub fn new(state: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Returns a read-only guard for the contained value.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.state.read().unwrap()
    }

    /// Returns a mutable guard for the contained value.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.state.write().unwrap()
    }
}

impl<T: Copy> Shared<T> {
    /// Returns a copy of the contained value taken under a single read lock.
    ///
    /// This is the atomic-observation primitive: every field of the copy
    /// comes from the same point in time.
    pub fn copied(&self) -> T {
        *self.read()
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn shared_clones_see_writes() {
        let shared = Shared::new(0u32);
        let clone = shared.clone();

        let handle = thread::spawn(move || {
            *clone.write() = 7;
        });
        handle.join().unwrap();

        assert_eq!(shared.copied(), 7);
    }
}
