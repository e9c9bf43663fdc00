use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// Store layer errors - combines validation and lookup failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    CoreError(#[from] dasi_core::error::CoreError),

    #[error("Not found: {0}")]
    NotFound(Uuid),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Event {0} does not repeat")]
    NotRecurring(Uuid),

    #[error("Event {id} has no occurrence on {date}")]
    NoSuchOccurrence { id: Uuid, date: NaiveDate },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
