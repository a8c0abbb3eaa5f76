use pitaka_domain::FinancialData;
use serde::{Deserialize, Serialize};

use crate::{reconcile::IdMapping, CoreError};

/// Rows written by one save.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCounts {
    pub income: usize,
    pub expenses: usize,
}

impl SavedCounts {
    pub fn total(&self) -> usize {
        self.income + self.expenses
    }
}

/// Result of a successful save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub saved: SavedCounts,
    /// Present only when non-canonical ids were replaced during the save.
    pub id_mapping: Option<IdMapping>,
}

/// Durable store for one owner's records.
///
/// Implementations reconcile ids before writing (see [`crate::reconcile_ids`])
/// and report failures as [`CoreError::Backend`] or [`CoreError::Io`].
pub trait FinanceBackend: Send + Sync {
    fn save(&self, data: &FinancialData) -> Result<SaveOutcome, CoreError>;
    fn load(&self) -> Result<FinancialData, CoreError>;
}
