use std::sync::{Arc, RwLock};

/// An immutable-snapshot-on-write container.
///
/// The writer replaces the contained value wholesale with [`Snapshot::store`];
/// readers obtain the current value with [`Snapshot::load`], which hands out a
/// cheap `Arc` clone. A reader therefore always sees a complete, consistent
/// value: a concurrent `store` swaps the inner `Arc` but can never mutate the
/// value a reader is already holding.
///
/// The simulation loop stores the active cell set here after each completed
/// reconciliation; the render loop loads it once per frame.
pub struct Snapshot<T> {
    current: Arc<RwLock<Arc<T>>>,
}

impl<T> Snapshot<T> {
    /// Creates a new `Snapshot` with the given initial value.
    pub fn new(value: T) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(value))),
        }
    }

    /// Returns the current snapshot.
    ///
    /// The returned `Arc` stays valid (and unchanged) regardless of any
    /// concurrent [`Snapshot::store`].
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn load(&self) -> Arc<T> {
        self.current.read().unwrap().clone()
    }

    /// Replaces the snapshot wholesale.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn store(&self, value: T) {
        *self.current.write().unwrap() = Arc::new(value);
    }
}

impl<T: Default> Default for Snapshot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            current: self.current.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_is_unaffected_by_later_store() {
        let snapshot = Snapshot::new(vec![1, 2, 3]);
        let held = snapshot.load();

        snapshot.store(vec![9]);

        // The reader's view is the pre-swap value, never a torn mix.
        assert_eq!(*held, vec![1, 2, 3]);
        assert_eq!(*snapshot.load(), vec![9]);
    }

    #[test]
    fn clones_share_the_same_snapshot() {
        let writer = Snapshot::new(0u32);
        let reader = writer.clone();

        writer.store(42);
        assert_eq!(*reader.load(), 42);
    }
}
