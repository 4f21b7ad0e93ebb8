use crate::error::SlotError;
use crate::types::TimeSlot;
use chrono::NaiveDate;

/// Storage seam of the time slot registry. Implementations must make
/// `ensure_date` and the check-then-set inside `book` atomic per
/// `(date, hour)` key: concurrent `ensure_date` calls may not duplicate a
/// slot, and of two concurrent `book` calls on the same free slot at most
/// one succeeds.
pub trait SlotRegistry: Clone + Send + Sync + 'static {
    /// Idempotent upsert: create any missing slot for the date's service
    /// hours with default flags, refresh only the label on existing ones.
    fn ensure_date(&self, date: NaiveDate) -> Result<(), SlotError>;

    /// All slots for the date, ordered by hour ascending. Ensures first.
    fn slots(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, SlotError>;

    /// Hours hidden from the booking picker: booked or disabled. Ensures first.
    fn blocked_hours(&self, date: NaiveDate) -> Result<Vec<i32>, SlotError>;

    /// Enable/disable a slot, leaving `is_booked` untouched. Ensures first.
    fn set_active(&self, date: NaiveDate, hour: i32, active: bool) -> Result<TimeSlot, SlotError>;

    /// Book a free, active slot. Does not ensure: booking a date nobody has
    /// listed yet is `NotFound`.
    fn book(&self, date: NaiveDate, hour: i32) -> Result<TimeSlot, SlotError>;

    /// Clear `is_booked` unconditionally; releasing a free slot is a no-op.
    fn release(&self, date: NaiveDate, hour: i32) -> Result<TimeSlot, SlotError>;
}
