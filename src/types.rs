use chrono::NaiveDate;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// First bookable hour of the day (10:00 AM).
pub const OPENING_HOUR: i32 = 10;
/// Last bookable hour of the day (11:00 PM).
pub const CLOSING_HOUR: i32 = 23;
pub const SLOTS_PER_DAY: usize = (CLOSING_HOUR - OPENING_HOUR + 1) as usize;

pub fn service_hours() -> RangeInclusive<i32> {
    OPENING_HOUR..=CLOSING_HOUR
}

/// A bookable one-hour unit of wash capacity, identified by `(date, hour)`.
///
/// `is_active` and `is_booked` are independent: disabling a slot does not
/// release an existing booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable, Insertable)]
#[diesel(table_name = crate::schema::time_slots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub hour: i32,
    pub label: String,
    pub is_active: bool,
    pub is_booked: bool,
}

impl TimeSlot {
    pub fn new(date: NaiveDate, hour: i32) -> Self {
        Self {
            date,
            hour,
            label: hour_label(hour),
            is_active: true,
            is_booked: false,
        }
    }
}

/// 12-hour clock rendering of an hour, e.g. 10 -> "10:00 AM", 13 -> "1:00 PM".
/// Hour 0 never occurs in this domain, so noon is the only special case.
pub fn hour_label(hour: i32) -> String {
    let period = if hour < 12 { "AM" } else { "PM" };
    let display_hour = if hour > 12 { hour - 12 } else { hour };
    format!("{display_hour}:00 {period}")
}

/// Aggregate counts shown in the admin management view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotStats {
    pub total: usize,
    pub active: usize,
    pub disabled: usize,
    pub booked: usize,
    pub available: usize,
}

impl SlotStats {
    pub fn for_slots(slots: &[TimeSlot]) -> Self {
        let total = slots.len();
        let active = slots.iter().filter(|slot| slot.is_active).count();
        let booked = slots.iter().filter(|slot| slot.is_booked).count();
        let available = slots
            .iter()
            .filter(|slot| slot.is_active && !slot.is_booked)
            .count();
        Self {
            total,
            active,
            disabled: total - active,
            booked,
            available,
        }
    }
}
