//! Change subscribers.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tracing::warn;

use crate::feature::PointRecord;

/// Error a subscriber may return; it is logged and otherwise ignored.
pub type SubscriberError = Box<dyn std::error::Error + Send + Sync>;

type Handler = Arc<dyn Fn(&[PointRecord]) -> Result<(), SubscriberError> + Send + Sync>;

#[derive(Default)]
struct ObserverList {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Ordered list of subscribers shared with their [`Subscription`] handles.
#[derive(Default)]
pub(crate) struct Observers {
    list: Arc<Mutex<ObserverList>>,
}

impl Observers {
    pub(crate) fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&[PointRecord]) -> Result<(), SubscriberError> + Send + Sync + 'static,
    {
        let mut list = self.list.lock().unwrap_or_else(PoisonError::into_inner);
        let id = list.next_id;
        list.next_id += 1;
        list.handlers.push((id, Arc::new(handler)));

        Subscription {
            id,
            list: Arc::downgrade(&self.list),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.list
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handlers
            .len()
    }

    /// Deliver `records` to every subscriber in subscription order.
    ///
    /// Returns the number of subscribers that failed.
    pub(crate) fn notify(&self, records: &[PointRecord]) -> usize {
        // Handlers run without the lock held so they may unsubscribe.
        let handlers: Vec<(u64, Handler)> = self
            .list
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handlers
            .clone();

        let mut failures = 0;
        for (id, handler) in handlers {
            match catch_unwind(AssertUnwindSafe(|| handler(records))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    failures += 1;
                    warn!(subscriber = id, error = %e, "subscriber failed");
                }
                Err(payload) => {
                    failures += 1;
                    warn!(
                        subscriber = id,
                        panic = panic_message(payload.as_ref()),
                        "subscriber panicked"
                    );
                }
            }
        }
        failures
    }
}

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe).
///
/// Dropping the handle keeps the subscriber registered; call
/// [`unsubscribe`](Subscription::unsubscribe) to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    list: Weak<Mutex<ObserverList>>,
}

impl Subscription {
    /// Remove the subscriber. Returns false if it was already gone or the
    /// store has been dropped.
    pub fn unsubscribe(self) -> bool {
        let Some(list) = self.list.upgrade() else {
            return false;
        };
        let mut list = list.lock().unwrap_or_else(PoisonError::into_inner);
        let before = list.handlers.len();
        list.handlers.retain(|(id, _)| *id != self.id);
        list.handlers.len() != before
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("next_id", &self.next_id)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers").field("len", &self.len()).finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
