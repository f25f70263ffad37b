use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::info;

use auth_cell::{InMemoryKeyValueStore, SessionService};
use doctor_cell::DoctorError;
use notification_cell::{AvailabilityBroadcaster, Subscription};
use shared_config::AppConfig;
use shared_utils::{Clock, SystemClock};

use crate::context::ClinicContext;

/// Shared state behind every route. The context sits behind one lock so
/// mutations stay strictly one at a time.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub context: Arc<RwLock<ClinicContext>>,
    pub session: SessionService,
    pub events: AvailabilityBroadcaster,
    _events_subscription: Arc<Subscription>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Result<Self, DoctorError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Arc<AppConfig>, clock: Arc<dyn Clock>) -> Result<Self, DoctorError> {
        let context = ClinicContext::from_seed_flag(config.seed_mock_data, clock)?;

        let events = AvailabilityBroadcaster::new(config.event_buffer);
        let subscription = events.attach(context.bus());

        let session = SessionService::new(
            Arc::new(InMemoryKeyValueStore::new()),
            Duration::from_millis(config.login_delay_ms),
        );

        info!(
            "Front desk ready: {} doctors, {} patients",
            context.doctors().len(),
            context.patients().len()
        );

        Ok(Self {
            config,
            context: Arc::new(RwLock::new(context)),
            session,
            events,
            _events_subscription: Arc::new(subscription),
        })
    }
}
