//! Thread-safe handle to a single store.

use std::sync::{Arc, Mutex, PoisonError};

use crate::persistence::Persistence;

use super::state::Store;

/// A [`Store`] behind one mutex, for embedders that call it from several
/// threads. Every operation holds the lock for its whole duration, so
/// mutations never interleave.
#[derive(Debug)]
pub struct SharedStore<P: Persistence> {
    inner: Arc<Mutex<Store<P>>>,
}

impl<P: Persistence> Clone for SharedStore<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: Persistence> SharedStore<P> {
    /// Wrap a store.
    pub fn new(store: Store<P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    ///
    /// A lock poisoned by a panicking caller is recovered; store operations
    /// replace state all-or-nothing, so the collection is still consistent.
    pub fn with<R>(&self, f: impl FnOnce(&mut Store<P>) -> R) -> R {
        let mut store = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::feature::Coordinates;
    use crate::persistence::MemoryPersistence;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_concurrent_adds_keep_every_record() {
        let shared = SharedStore::new(Store::open(MemoryPersistence::new(), StoreConfig::default()));

        let workers: Vec<_> = (0..4)
            .map(|worker| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        shared
                            .with(|store| {
                                store.add(Coordinates::new(0.0, 0.0), format!("w{worker}-{i}"), "park")
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let ids: HashSet<String> = shared.with(|store| {
            store.records().iter().filter_map(|r| r.id.clone()).collect()
        });
        assert_eq!(ids.len(), 100);
    }
}
