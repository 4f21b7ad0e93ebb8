use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};

use chrono::NaiveDate;

use crate::{
    backend::SlotRegistry, configuration::Configuration, error::SlotError, types::TimeSlot,
};

pub struct MockRegistryInner {
    pub failure: Mutex<Option<SlotError>>,
    pub calls_to_ensure_date: AtomicU64,
    pub calls_to_slots: AtomicU64,
    pub calls_to_blocked_hours: AtomicU64,
    pub calls_to_set_active: AtomicU64,
    pub calls_to_book: AtomicU64,
    pub calls_to_release: AtomicU64,
    pub slots: Mutex<Vec<TimeSlot>>,
}

#[derive(Clone)]
pub struct MockRegistry(pub Arc<MockRegistryInner>);

pub fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

pub fn sample_slot() -> TimeSlot {
    TimeSlot::new(sample_date(), 14)
}

impl MockRegistry {
    pub fn new() -> Self {
        Self(Arc::new(MockRegistryInner {
            failure: Mutex::new(None),
            calls_to_ensure_date: AtomicU64::default(),
            calls_to_slots: AtomicU64::default(),
            calls_to_blocked_hours: AtomicU64::default(),
            calls_to_set_active: AtomicU64::default(),
            calls_to_book: AtomicU64::default(),
            calls_to_release: AtomicU64::default(),
            slots: Mutex::default(),
        }))
    }

    pub fn set_failure(&self, failure: Option<SlotError>) {
        *self.0.failure.lock().unwrap() = failure;
    }

    fn slot_result(&self) -> Result<TimeSlot, SlotError> {
        match self.0.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(sample_slot()),
        }
    }
}

impl SlotRegistry for MockRegistry {
    fn ensure_date(&self, _date: NaiveDate) -> Result<(), SlotError> {
        self.0.calls_to_ensure_date.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn slots(&self, _date: NaiveDate) -> Result<Vec<TimeSlot>, SlotError> {
        self.0.calls_to_slots.fetch_add(1, Ordering::SeqCst);
        match self.0.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(self.0.slots.lock().unwrap().clone()),
        }
    }

    fn blocked_hours(&self, _date: NaiveDate) -> Result<Vec<i32>, SlotError> {
        self.0.calls_to_blocked_hours.fetch_add(1, Ordering::SeqCst);
        match self.0.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(self
                .0
                .slots
                .lock()
                .unwrap()
                .iter()
                .filter(|slot| slot.is_booked || !slot.is_active)
                .map(|slot| slot.hour)
                .collect()),
        }
    }

    fn set_active(&self, _date: NaiveDate, _hour: i32, _active: bool) -> Result<TimeSlot, SlotError> {
        self.0.calls_to_set_active.fetch_add(1, Ordering::SeqCst);
        self.slot_result()
    }

    fn book(&self, _date: NaiveDate, _hour: i32) -> Result<TimeSlot, SlotError> {
        self.0.calls_to_book.fetch_add(1, Ordering::SeqCst);
        self.slot_result()
    }

    fn release(&self, _date: NaiveDate, _hour: i32) -> Result<TimeSlot, SlotError> {
        self.0.calls_to_release.fetch_add(1, Ordering::SeqCst);
        self.slot_result()
    }
}

#[derive(Clone)]
pub struct TestConfiguration;

impl Configuration for TestConfiguration {
    fn admin_password(&self) -> String {
        "123".into()
    }

    fn port(&self) -> String {
        "0".into()
    }

    fn database_url(&self) -> Option<String> {
        None
    }
}
