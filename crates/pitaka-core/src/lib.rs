//! pitaka-core
//!
//! Calculators, bucketing, aggregation, and sync bookkeeping for Pitaka.
//! Depends on pitaka-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod aggregation;
pub mod autosave;
pub mod backend;
pub mod buckets;
pub mod deductions;
pub mod error;
pub mod format;
pub mod granularity;
pub mod query;
pub mod reconcile;
pub mod report;
pub mod session;
pub mod summary;
pub mod time;
pub mod validation;

pub use aggregation::*;
pub use autosave::{Debouncer, DEFAULT_AUTOSAVE_DELAY_MS};
pub use backend::{FinanceBackend, SaveOutcome, SavedCounts};
pub use buckets::*;
pub use deductions::*;
pub use error::{CoreError, RecordKind};
pub use granularity::Granularity;
pub use query::{ExpensePage, ExpenseQuery, EXPENSES_PER_PAGE};
pub use reconcile::*;
pub use report::*;
pub use session::*;
pub use summary::*;
pub use time::{Clock, FixedClock, SystemClock};
