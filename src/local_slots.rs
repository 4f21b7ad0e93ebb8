use crate::backend::SlotRegistry;
use crate::error::SlotError;
use crate::types::{hour_label, service_hours, TimeSlot, CLOSING_HOUR, OPENING_HOUR};
use chrono::NaiveDate;
use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

/// In-memory registry used when no database is configured. The mutex makes
/// every operation a single read-modify-write, which already gives the
/// per-key atomicity the registry requires.
#[derive(Debug, Clone, Default)]
pub struct LocalSlots {
    slots: Arc<Mutex<BTreeMap<(NaiveDate, i32), TimeSlot>>>,
}

impl LocalSlots {
    fn ensure_date_locked(slots: &mut BTreeMap<(NaiveDate, i32), TimeSlot>, date: NaiveDate) {
        for hour in service_hours() {
            slots
                .entry((date, hour))
                .and_modify(|slot| slot.label = hour_label(hour))
                .or_insert_with(|| TimeSlot::new(date, hour));
        }
    }

    fn day(slots: &BTreeMap<(NaiveDate, i32), TimeSlot>, date: NaiveDate) -> Vec<TimeSlot> {
        slots
            .range((date, OPENING_HOUR)..=(date, CLOSING_HOUR))
            .map(|(_, slot)| slot.clone())
            .collect()
    }
}

impl SlotRegistry for LocalSlots {
    fn ensure_date(&self, date: NaiveDate) -> Result<(), SlotError> {
        let mut slots = self.slots.lock().unwrap();
        Self::ensure_date_locked(&mut slots, date);
        Ok(())
    }

    fn slots(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, SlotError> {
        let mut slots = self.slots.lock().unwrap();
        Self::ensure_date_locked(&mut slots, date);
        Ok(Self::day(&slots, date))
    }

    fn blocked_hours(&self, date: NaiveDate) -> Result<Vec<i32>, SlotError> {
        let mut slots = self.slots.lock().unwrap();
        Self::ensure_date_locked(&mut slots, date);
        Ok(Self::day(&slots, date)
            .iter()
            .filter(|slot| slot.is_booked || !slot.is_active)
            .map(|slot| slot.hour)
            .collect())
    }

    fn set_active(&self, date: NaiveDate, hour: i32, active: bool) -> Result<TimeSlot, SlotError> {
        let mut slots = self.slots.lock().unwrap();
        Self::ensure_date_locked(&mut slots, date);
        let slot = slots.get_mut(&(date, hour)).ok_or(SlotError::NotFound)?;
        slot.is_active = active;
        Ok(slot.clone())
    }

    fn book(&self, date: NaiveDate, hour: i32) -> Result<TimeSlot, SlotError> {
        let mut slots = self.slots.lock().unwrap();
        let slot = slots.get_mut(&(date, hour)).ok_or(SlotError::NotFound)?;
        if !slot.is_active {
            return Err(SlotError::Disabled);
        }
        if slot.is_booked {
            return Err(SlotError::AlreadyBooked);
        }
        slot.is_booked = true;
        Ok(slot.clone())
    }

    fn release(&self, date: NaiveDate, hour: i32) -> Result<TimeSlot, SlotError> {
        let mut slots = self.slots.lock().unwrap();
        let slot = slots.get_mut(&(date, hour)).ok_or(SlotError::NotFound)?;
        slot.is_booked = false;
        Ok(slot.clone())
    }
}
