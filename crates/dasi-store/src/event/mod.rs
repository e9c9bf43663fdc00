//! Event records, categories, and validating drafts.

mod category;
mod model;

pub use category::EventCategory;
pub use model::{Event, EventDraft};

pub(crate) use model::hhmm;
