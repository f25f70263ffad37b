use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info, warn};

use appointment_cell::{
    Appointment, AppointmentBookingService, AppointmentError, AppointmentSearchQuery, AppointmentStatus,
    BookAppointmentRequest, BookingValidator, DailyAppointmentSummary, UpdateAppointmentRequest,
};
use doctor_cell::{
    AvailabilityStore, BlockOutcome, BlockingService, Doctor, DoctorAvailability, DoctorDirectory, DoctorError,
    TimeSlot,
};
use notification_cell::{AvailabilityChangeBus, AvailabilityObserverRegistry, Subscription};
use patient_cell::{CreatePatientRequest, Patient, PatientError, PatientRegistry, UpdatePatientRequest};
use shared_utils::Clock;

use crate::seed;

/// Everything the front desk reads and mutates: doctors and their cached
/// days, appointments, patients and the change bus.
///
/// Engine methods (`add_appointment`, `update_appointment`, ...) trust their
/// input. The `book_appointment` family checks booking preconditions first
/// and is what request handlers use.
pub struct ClinicContext {
    store: AvailabilityStore,
    booking: AppointmentBookingService,
    blocking: BlockingService,
    bus: AvailabilityChangeBus,
    patients: PatientRegistry,
    validator: BookingValidator,
    seeded: bool,
    revision: u64,
}

impl ClinicContext {
    /// An empty clinic staffed by `doctors`.
    pub fn new(doctors: DoctorDirectory, clock: Arc<dyn Clock>) -> Self {
        let bus = AvailabilityChangeBus::new();

        Self {
            store: AvailabilityStore::new(doctors),
            booking: AppointmentBookingService::new(bus.clone()),
            blocking: BlockingService::new(bus.clone()),
            bus,
            patients: PatientRegistry::default(),
            validator: BookingValidator::new(clock),
            seeded: false,
            revision: 0,
        }
    }

    /// The mock clinic: one doctor, three patients, three appointments.
    pub fn seeded(clock: Arc<dyn Clock>) -> Result<Self, DoctorError> {
        let doctors = DoctorDirectory::with_doctors(seed::mock_doctors())?;
        let mut context = Self::new(doctors, clock);
        context.seeded = true;
        context.load_seed();
        Ok(context)
    }

    pub fn from_seed_flag(seed_mock_data: bool, clock: Arc<dyn Clock>) -> Result<Self, DoctorError> {
        if seed_mock_data {
            Self::seeded(clock)
        } else {
            Ok(Self::new(DoctorDirectory::with_doctors(seed::mock_doctors())?, clock))
        }
    }

    fn load_seed(&mut self) {
        self.booking.reset(seed::mock_appointments());
        self.patients.reset(seed::mock_patients());
    }

    /// Drops cached days and reloads the starting data. Subscribers stay
    /// registered.
    pub fn reset(&mut self) {
        info!("Resetting clinic context (seeded: {})", self.seeded);
        self.store.clear();
        if self.seeded {
            self.load_seed();
        } else {
            self.booking.reset(Vec::new());
            self.patients.reset(Vec::new());
        }
        self.revision += 1;
    }

    pub fn bus(&self) -> &AvailabilityChangeBus {
        &self.bus
    }

    pub fn doctors(&self) -> &[Doctor] {
        self.store.doctors().list()
    }

    pub fn doctor(&self, doctor_id: &str) -> Option<&Doctor> {
        self.store.doctor(doctor_id)
    }

    pub fn today(&self) -> NaiveDate {
        self.validator.today()
    }

    // ==========================================================================
    // AVAILABILITY
    // ==========================================================================

    /// Get-or-create read of one doctor's day.
    pub fn get_doctor_availability(&mut self, doctor_id: &str, date: NaiveDate) -> Option<DoctorAvailability> {
        self.store.get(doctor_id, date, self.booking.ledger()).cloned()
    }

    /// Rebuilds the day from working hours and appointments, keeping blocks.
    pub fn generate_time_slots(&mut self, doctor_id: &str, date: NaiveDate) -> Option<DoctorAvailability> {
        self.store.regenerate(doctor_id, date, self.booking.ledger()).cloned()
    }

    pub fn get_available_time_slots(&mut self, doctor_id: &str, date: NaiveDate) -> Vec<TimeSlot> {
        self.store
            .get(doctor_id, date, self.booking.ledger())
            .map(|availability| availability.available_slots())
            .unwrap_or_default()
    }

    /// Available slots that have not started yet, by the context clock.
    pub fn get_upcoming_time_slots(&mut self, doctor_id: &str, date: NaiveDate) -> Vec<TimeSlot> {
        match self.store.get(doctor_id, date, self.booking.ledger()) {
            Some(availability) => self.validator.upcoming_slots(availability),
            None => Vec::new(),
        }
    }

    pub fn block_time_slot(
        &mut self,
        doctor_id: &str,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        reason: Option<String>,
    ) -> Option<BlockOutcome> {
        self.blocking.block_range(
            &mut self.store,
            self.booking.ledger(),
            doctor_id,
            date,
            start_time,
            end_time,
            reason,
        )
    }

    pub fn unblock_time_slot(
        &mut self,
        doctor_id: &str,
        date: NaiveDate,
        slot_id: &str,
    ) -> Result<Option<DoctorAvailability>, DoctorError> {
        self.blocking
            .unblock_slot(&mut self.store, self.booking.ledger(), doctor_id, date, slot_id)
    }

    pub fn subscribe_to_availability_updates<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&str, NaiveDate) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.bus.subscribe_fn(callback)
    }

    /// Notifies subscribers without changing anything.
    pub fn broadcast_availability_update(&self, doctor_id: &str, date: NaiveDate) -> usize {
        self.bus.publish(doctor_id, date)
    }

    /// Bumps the revision views poll to decide whether to re-render.
    pub fn refresh_availability(&mut self) -> u64 {
        self.revision += 1;
        debug!("Availability revision is now {}", self.revision);
        self.revision
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ==========================================================================
    // APPOINTMENTS (ENGINE)
    // ==========================================================================

    pub fn appointment(&self, appointment_id: &str) -> Option<&Appointment> {
        self.booking.ledger().get(appointment_id)
    }

    pub fn appointments(&self, query: &AppointmentSearchQuery) -> Vec<Appointment> {
        self.booking.ledger().search(query)
    }

    pub fn daily_summary(&self, date: NaiveDate) -> DailyAppointmentSummary {
        self.booking.ledger().daily_summary(date)
    }

    pub fn add_appointment(&mut self, appointment: Appointment) -> Option<String> {
        self.booking.book(appointment, &mut self.store)
    }

    /// Returns the appointment as it was before the update.
    pub fn update_appointment(&mut self, appointment: Appointment) -> Option<Appointment> {
        self.booking.reschedule(appointment, &mut self.store)
    }

    pub fn delete_appointment(&mut self, appointment_id: &str) -> Option<Appointment> {
        self.booking.cancel(appointment_id, &mut self.store)
    }

    // ==========================================================================
    // APPOINTMENTS (CHECKED)
    // ==========================================================================

    /// Books a slot for a registered patient after checking that the slot
    /// exists, is free and unblocked, and has not passed.
    pub fn book_appointment(&mut self, request: BookAppointmentRequest) -> Result<Appointment, AppointmentError> {
        let patient = self
            .patients
            .get(&request.patient_id)
            .cloned()
            .ok_or_else(|| AppointmentError::PatientNotFound(request.patient_id.clone()))?;

        let doctor_id = request
            .doctor_id
            .clone()
            .unwrap_or_else(|| seed::DEFAULT_DOCTOR_ID.to_string());
        self.check_slot(&doctor_id, request.date, request.time, None)?;

        let appointment = Appointment {
            id: Appointment::new_id(),
            patient_id: patient.id.clone(),
            patient_number: patient.patient_number.clone(),
            patient_name: patient.full_name(),
            date: request.date,
            time: request.time,
            doctor_id: doctor_id.clone(),
            status: AppointmentStatus::Scheduled,
            is_new_patient: patient.is_new,
            notes: request.notes,
        };

        self.add_appointment(appointment.clone())
            .ok_or(AppointmentError::DoctorNotFound(doctor_id))?;
        Ok(appointment)
    }

    /// Applies a partial update. A move to another slot, or back to
    /// `Scheduled`, is checked like a new booking.
    pub fn change_appointment(
        &mut self,
        appointment_id: &str,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let current = self
            .appointment(appointment_id)
            .cloned()
            .ok_or_else(|| AppointmentError::NotFound(appointment_id.to_string()))?;
        let updated = request.apply_to(&current);

        let reactivated = !current.is_active() && updated.is_active();
        if updated.is_active() && (request.moves_slot(&current) || reactivated) {
            self.check_slot(&updated.doctor_id, updated.date, updated.time, Some(&updated.id))?;
        }

        self.update_appointment(updated.clone())
            .ok_or_else(|| AppointmentError::NotFound(appointment_id.to_string()))?;
        Ok(updated)
    }

    pub fn cancel_appointment(&mut self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        self.delete_appointment(appointment_id)
            .ok_or_else(|| AppointmentError::NotFound(appointment_id.to_string()))
    }

    fn check_slot(
        &mut self,
        doctor_id: &str,
        date: NaiveDate,
        time: NaiveTime,
        appointment_id: Option<&str>,
    ) -> Result<(), AppointmentError> {
        let availability = self
            .store
            .get(doctor_id, date, self.booking.ledger())
            .ok_or_else(|| {
                warn!("Booking rejected: doctor {} not found", doctor_id);
                AppointmentError::DoctorNotFound(doctor_id.to_string())
            })?;
        self.validator.check_slot(availability, time, appointment_id)
    }

    // ==========================================================================
    // PATIENTS
    // ==========================================================================

    pub fn patients(&self) -> &[Patient] {
        self.patients.list()
    }

    pub fn patient(&self, patient_id: &str) -> Option<&Patient> {
        self.patients.get(patient_id)
    }

    pub fn search_patients(&self, query: &str) -> Vec<Patient> {
        self.patients.search(query)
    }

    pub fn register_patient(&mut self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        let today = self.today();
        self.patients.register(request, today)
    }

    pub fn update_patient(&mut self, patient_id: &str, request: UpdatePatientRequest) -> Result<Patient, PatientError> {
        self.patients.update(patient_id, request)
    }
}
