use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::NotificationError;

pub type AvailabilityCallback = Arc<dyn Fn(&str, NaiveDate) -> anyhow::Result<()> + Send + Sync>;

type Registry = Mutex<BTreeMap<u64, AvailabilityCallback>>;

/// Observer registry for (doctor, date) availability changes.
pub trait AvailabilityObserverRegistry {
    fn subscribe(&self, callback: AvailabilityCallback) -> Subscription;

    /// Runs every registered callback and returns how many completed without
    /// failing. Failures are logged here and never reach the caller.
    fn publish(&self, doctor_id: &str, date: NaiveDate) -> usize;
}

/// In-process change bus. Clones share one registry.
#[derive(Clone, Default)]
pub struct AvailabilityChangeBus {
    subscribers: Arc<Registry>,
    next_id: Arc<AtomicU64>,
}

impl AvailabilityChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_fn<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&str, NaiveDate) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Arc::new(callback))
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.subscribers).len()
    }

    fn run_callback(
        subscription_id: u64,
        callback: &AvailabilityCallback,
        doctor_id: &str,
        date: NaiveDate,
    ) -> Result<(), NotificationError> {
        match panic::catch_unwind(AssertUnwindSafe(|| callback(doctor_id, date))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(NotificationError::SubscriberFailed {
                subscription_id,
                source,
            }),
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic payload".to_string());
                Err(NotificationError::SubscriberPanicked {
                    subscription_id,
                    message,
                })
            }
        }
    }
}

impl AvailabilityObserverRegistry for AvailabilityChangeBus {
    fn subscribe(&self, callback: AvailabilityCallback) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.subscribers).insert(id, callback);
        debug!("Registered availability subscriber {}", id);

        Subscription {
            id,
            registry: Arc::downgrade(&self.subscribers),
        }
    }

    fn publish(&self, doctor_id: &str, date: NaiveDate) -> usize {
        // Snapshot so callbacks may subscribe or unsubscribe while running.
        let callbacks: Vec<(u64, AvailabilityCallback)> = lock(&self.subscribers)
            .iter()
            .map(|(id, callback)| (*id, Arc::clone(callback)))
            .collect();

        let mut delivered = 0;
        for (id, callback) in &callbacks {
            match Self::run_callback(*id, callback, doctor_id, date) {
                Ok(()) => delivered += 1,
                Err(e) => warn!("Error in availability update callback: {}", e),
            }
        }

        debug!(
            "Published availability change for doctor {} on {} to {}/{} subscribers",
            doctor_id,
            date,
            delivered,
            callbacks.len()
        );
        delivered
    }
}

/// Handle returned by `subscribe`; removes exactly its own callback.
#[must_use = "dropping a Subscription keeps the callback registered"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<Registry>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns false when the callback was already gone or the bus dropped.
    pub fn unsubscribe(self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => {
                let removed = lock(&registry).remove(&self.id).is_some();
                if removed {
                    debug!("Removed availability subscriber {}", self.id);
                }
                removed
            }
            None => false,
        }
    }
}

fn lock(registry: &Registry) -> MutexGuard<'_, BTreeMap<u64, AvailabilityCallback>> {
    registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
