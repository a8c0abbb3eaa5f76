//! pitaka-domain
//!
//! Pure domain models (income entries, expenses, categories, record ids).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod data;
pub mod expense;
pub mod income;
pub mod record_id;

pub use category::*;
pub use common::*;
pub use data::*;
pub use expense::*;
pub use income::*;
pub use record_id::*;
