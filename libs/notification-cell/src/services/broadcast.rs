use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::broadcast;
use tracing::debug;

use crate::services::bus::{AvailabilityObserverRegistry, Subscription};
use crate::{AvailabilityEvent, NotificationError};

pub type EventSender = broadcast::Sender<AvailabilityEvent>;
pub type EventReceiver = broadcast::Receiver<AvailabilityEvent>;

/// Fans bus notifications out to views outside the process loop (event
/// streams), each with its own receiver.
#[derive(Clone)]
pub struct AvailabilityBroadcaster {
    sender: EventSender,
    sequence: Arc<AtomicU64>,
}

impl AvailabilityBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));

        Self {
            sender,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn last_sequence(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    pub fn send(&self, doctor_id: &str, date: NaiveDate) -> AvailabilityEvent {
        let event = AvailabilityEvent {
            sequence: self.sequence.fetch_add(1, Ordering::SeqCst) + 1,
            doctor_id: doctor_id.to_string(),
            date,
            published_at: Utc::now(),
        };

        if let Err(e) = self.sender.send(event.clone()) {
            // No open streams right now; nothing to deliver.
            debug!("No listeners for availability event {}: {}", event.sequence, e);
        }

        event
    }

    /// Registers this broadcaster on a bus so every publish is forwarded.
    pub fn attach<R>(&self, bus: &R) -> Subscription
    where
        R: AvailabilityObserverRegistry + ?Sized,
    {
        let broadcaster = self.clone();
        bus.subscribe(Arc::new(move |doctor_id: &str, date: NaiveDate| -> anyhow::Result<()> {
            broadcaster.send(doctor_id, date);
            Ok(())
        }))
    }

    pub fn to_json(event: &AvailabilityEvent) -> Result<String, NotificationError> {
        Ok(serde_json::to_string(event)?)
    }
}

impl Default for AvailabilityBroadcaster {
    fn default() -> Self {
        Self::new(100)
    }
}
