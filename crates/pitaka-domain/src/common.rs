//! Shared traits implemented by every stored record.

use chrono::NaiveDate;

use crate::record_id::RecordId;

/// Exposes the identifier a record is stored under.
pub trait Identifiable {
    fn id(&self) -> &RecordId;
}

/// Calendar day a record is booked on.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Short human description used in prompts and logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}
