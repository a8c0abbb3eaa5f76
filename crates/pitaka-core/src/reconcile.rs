//! Canonical-id reconciliation.
//!
//! Records created offline may carry ids that are not UUIDs. Before the first
//! sync they are given fresh v4 ids; the old → new pairs are reported back so
//! the in-memory copy can be rewritten once the backend write succeeds.

use std::collections::{HashMap, VecDeque};

use pitaka_domain::{FinancialData, RecordId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRemap {
    pub old_id: RecordId,
    pub new_id: RecordId,
}

/// Old → new id pairs, kept per collection in record order. A legacy id shared
/// by several records appears once per record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdMapping {
    pub income: Vec<IdRemap>,
    pub expenses: Vec<IdRemap>,
}

impl IdMapping {
    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expenses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.income.len() + self.expenses.len()
    }

    /// Rewrites matching ids in `data`; records that are not listed are left alone.
    /// The n-th record carrying an old id takes that id's n-th replacement.
    /// Returns how many records were rewritten.
    pub fn apply(&self, data: &mut FinancialData) -> usize {
        let mut income = pending(&self.income);
        let mut expenses = pending(&self.expenses);
        let mut rewritten = 0;
        for entry in &mut data.income_history {
            if let Some(new_id) = take_next(&mut income, &entry.id) {
                entry.id = new_id;
                rewritten += 1;
            }
        }
        for expense in &mut data.expenses {
            if let Some(new_id) = take_next(&mut expenses, &expense.id) {
                expense.id = new_id;
                rewritten += 1;
            }
        }
        rewritten
    }
}

fn pending(pairs: &[IdRemap]) -> HashMap<&RecordId, VecDeque<&RecordId>> {
    let mut queues: HashMap<&RecordId, VecDeque<&RecordId>> = HashMap::new();
    for pair in pairs {
        queues.entry(&pair.old_id).or_default().push_back(&pair.new_id);
    }
    queues
}

fn take_next(queues: &mut HashMap<&RecordId, VecDeque<&RecordId>>, id: &RecordId) -> Option<RecordId> {
    queues
        .get_mut(id)
        .and_then(VecDeque::pop_front)
        .cloned()
}

/// Returns the outgoing copy of `data` with canonical ids, plus the mapping
/// when any id changed. Canonical ids pass through untouched.
pub fn reconcile_ids(data: &FinancialData) -> (FinancialData, Option<IdMapping>) {
    let mut outgoing = data.clone();
    let mut mapping = IdMapping::default();

    for entry in &mut outgoing.income_history {
        if let Some(new_id) = assign(&entry.id, &mut mapping.income) {
            entry.id = new_id;
        }
    }
    for expense in &mut outgoing.expenses {
        if let Some(new_id) = assign(&expense.id, &mut mapping.expenses) {
            expense.id = new_id;
        }
    }

    if mapping.is_empty() {
        return (outgoing, None);
    }
    tracing::info!(
        income = mapping.income.len(),
        expenses = mapping.expenses.len(),
        "assigned canonical ids to local records"
    );
    (outgoing, Some(mapping))
}

/// A fresh id for every non-canonical record, even when two records share one.
fn assign(id: &RecordId, pairs: &mut Vec<IdRemap>) -> Option<RecordId> {
    if id.is_canonical() {
        return None;
    }
    let new_id = RecordId::generate();
    pairs.push(IdRemap {
        old_id: id.clone(),
        new_id: new_id.clone(),
    });
    Some(new_id)
}
