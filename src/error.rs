use thiserror::Error;

/// Business errors of the slot registry. Storage failures are carried
/// separately so the HTTP layer can map them to a generic server error
/// instead of a client-facing reason.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlotError {
    #[error("Time slot not found")]
    NotFound,
    #[error("Time slot is disabled")]
    Disabled,
    #[error("Time slot is already booked")]
    AlreadyBooked,
    #[error("storage failure: {0}")]
    Storage(String),
}
