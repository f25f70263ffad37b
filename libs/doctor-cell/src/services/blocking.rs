use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info, warn};

use notification_cell::{AvailabilityChangeBus, AvailabilityObserverRegistry};

use crate::models::{BlockOutcome, DoctorAvailability, DoctorError};
use crate::services::availability::AvailabilityStore;
use crate::services::slots::BookingLookup;

/// Marks parts of a doctor's day as unavailable, independently of bookings.
#[derive(Clone)]
pub struct BlockingService {
    bus: AvailabilityChangeBus,
}

impl BlockingService {
    pub fn new(bus: AvailabilityChangeBus) -> Self {
        Self { bus }
    }

    /// Blocks every slot overlapping `[start_time, end_time)` under the
    /// inclusive three-way test and overwrites its reason. Booked slots stay
    /// booked. `None` for an unknown doctor.
    #[allow(clippy::too_many_arguments)]
    pub fn block_range(
        &self,
        store: &mut AvailabilityStore,
        bookings: &dyn BookingLookup,
        doctor_id: &str,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        reason: Option<String>,
    ) -> Option<BlockOutcome> {
        debug!("Blocking {} on {} from {} to {}", doctor_id, date, start_time, end_time);

        let mut availability = store.get(doctor_id, date, bookings)?.clone();

        let mut affected_slots = 0;
        for slot in availability
            .time_slots
            .iter_mut()
            .filter(|slot| slot.falls_within_block(start_time, end_time))
        {
            slot.block(reason.clone());
            affected_slots += 1;
        }

        store.update(availability.clone());
        self.bus.publish(doctor_id, date);

        info!(
            "Blocked {} slots for doctor {} on {} ({:?})",
            affected_slots, doctor_id, date, reason
        );
        Some(BlockOutcome {
            availability,
            affected_slots,
        })
    }

    /// Clears the block on exactly one slot. `Ok(None)` for an unknown doctor.
    pub fn unblock_slot(
        &self,
        store: &mut AvailabilityStore,
        bookings: &dyn BookingLookup,
        doctor_id: &str,
        date: NaiveDate,
        slot_id: &str,
    ) -> Result<Option<DoctorAvailability>, DoctorError> {
        debug!("Unblocking slot {} for {} on {}", slot_id, doctor_id, date);

        let mut availability = match store.get(doctor_id, date, bookings) {
            Some(availability) => availability.clone(),
            None => return Ok(None),
        };

        let slot = availability
            .time_slots
            .iter_mut()
            .find(|slot| slot.id == slot_id)
            .ok_or_else(|| {
                warn!("Slot {} not found for doctor {} on {}", slot_id, doctor_id, date);
                DoctorError::SlotNotFound(slot_id.to_string())
            })?;
        slot.unblock();

        store.update(availability.clone());
        self.bus.publish(doctor_id, date);

        info!("Unblocked slot {} for doctor {}", slot_id, doctor_id);
        Ok(Some(availability))
    }
}
