//! Core domain logic for the sleep log.
//!
//! This crate contains:
//! - The sleep timer and its start/stop/resume/manual-edit rules
//! - Saved sleep entries and their duration validation
//! - The [`SleepLog`] store with derived views and its JSON snapshot
//! - Helpers for the `HH:MM` and `YYYY-MM-DDTHH:MM` input formats

mod entry;
mod error;
pub mod format;
mod store;
#[cfg(test)]
mod test_zone;
mod timer;
mod types;

pub use entry::{SleepEntry, validate_range};
pub use error::StoreError;
pub use format::{format_datetime_input, format_time_input};
pub use store::{NO_SLEEP_RECORDED, SaveRequest, SleepLog};
pub use timer::Timer;
pub use types::{EntryId, ValidationError};
