//! In-memory session state and its transitions.
//!
//! Every change to the records goes through [`reduce`], a pure
//! `(state, action) -> state` function. [`Session`] wraps the current state with
//! the bookkeeping needed around backend calls: request tokens so a load that
//! finishes after a newer request (or after teardown) is dropped, and a guard
//! that allows one save at a time.

use pitaka_domain::{Expense, FinancialData, IncomeEntry, RecordId};

use crate::{
    backend::{FinanceBackend, SaveOutcome},
    error::RecordKind,
    reconcile::IdMapping,
    validation::{validate_expense, validate_income},
    CoreError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddIncome(IncomeEntry),
    UpdateIncome(IncomeEntry),
    DeleteIncome(RecordId),
    AddExpense(Expense),
    UpdateExpense(Expense),
    DeleteExpense(RecordId),
    /// Swap in a freshly loaded data set.
    Replace(FinancialData),
    ApplyMapping(IdMapping),
}

impl Action {
    /// Whether applying the action changes records that need saving.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Action::Replace(_) | Action::ApplyMapping(_))
    }
}

/// Applies `action` to `state`, returning the next state. `state` is never modified.
pub fn reduce(state: &FinancialData, action: Action) -> Result<FinancialData, CoreError> {
    let mut next = state.clone();
    match action {
        Action::AddIncome(entry) => {
            validate_income(&entry)?;
            next.income_history.push(entry);
        }
        Action::UpdateIncome(entry) => {
            validate_income(&entry)?;
            let slot = next
                .income_history
                .iter_mut()
                .find(|existing| existing.id == entry.id)
                .ok_or_else(|| not_found(RecordKind::Income, &entry.id))?;
            *slot = entry;
        }
        Action::DeleteIncome(id) => {
            let before = next.income_history.len();
            next.income_history.retain(|entry| entry.id != id);
            if next.income_history.len() == before {
                return Err(not_found(RecordKind::Income, &id));
            }
        }
        Action::AddExpense(expense) => {
            validate_expense(&expense)?;
            next.expenses.push(expense);
        }
        Action::UpdateExpense(expense) => {
            validate_expense(&expense)?;
            let slot = next
                .expenses
                .iter_mut()
                .find(|existing| existing.id == expense.id)
                .ok_or_else(|| not_found(RecordKind::Expense, &expense.id))?;
            *slot = expense;
        }
        Action::DeleteExpense(id) => {
            let before = next.expenses.len();
            next.expenses.retain(|expense| expense.id != id);
            if next.expenses.len() == before {
                return Err(not_found(RecordKind::Expense, &id));
            }
        }
        Action::Replace(data) => next = data,
        Action::ApplyMapping(mapping) => {
            mapping.apply(&mut next);
        }
    }
    Ok(next)
}

fn not_found(kind: RecordKind, id: &RecordId) -> CoreError {
    CoreError::RecordNotFound {
        kind,
        id: id.clone(),
    }
}

/// Identifies one backend request issued by a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// What happened to a finished load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadCommit {
    Applied,
    /// A newer request was issued after this one.
    Stale,
    /// The session was torn down.
    Closed,
}

#[derive(Debug, Default)]
pub struct Session {
    data: FinancialData,
    generation: u64,
    closed: bool,
    save_in_flight: bool,
}

impl Session {
    pub fn new(data: FinancialData) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn data(&self) -> &FinancialData {
        &self.data
    }

    pub fn is_alive(&self) -> bool {
        !self.closed
    }

    pub fn is_saving(&self) -> bool {
        self.save_in_flight
    }

    pub fn dispatch(&mut self, action: Action) -> Result<(), CoreError> {
        self.data = reduce(&self.data, action)?;
        Ok(())
    }

    /// Starts a request, superseding any outstanding one.
    pub fn begin_request(&mut self) -> RequestToken {
        self.generation += 1;
        RequestToken(self.generation)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        !self.closed && token.0 == self.generation
    }

    /// Applies a finished load if its token is still current. Errors from a
    /// stale or closed request are discarded along with the data.
    pub fn commit_load(
        &mut self,
        token: RequestToken,
        result: Result<FinancialData, CoreError>,
    ) -> Result<LoadCommit, CoreError> {
        if self.closed {
            tracing::debug!("dropping load result for closed session");
            return Ok(LoadCommit::Closed);
        }
        if token.0 != self.generation {
            tracing::debug!(token = token.0, current = self.generation, "dropping stale load");
            return Ok(LoadCommit::Stale);
        }
        let data = result?;
        self.dispatch(Action::Replace(data))?;
        Ok(LoadCommit::Applied)
    }

    /// Invalidates outstanding requests; later commits are ignored.
    pub fn teardown(&mut self) {
        self.closed = true;
        self.generation += 1;
    }

    /// Marks a save as started and returns the snapshot to write.
    pub fn begin_save(&mut self) -> Result<FinancialData, CoreError> {
        if self.save_in_flight {
            return Err(CoreError::SaveInFlight);
        }
        self.save_in_flight = true;
        Ok(self.data.clone())
    }

    /// Ends the in-flight save. On success any id mapping is applied to the
    /// current records, including ones added while the save was running.
    pub fn finish_save(
        &mut self,
        result: Result<SaveOutcome, CoreError>,
    ) -> Result<SaveOutcome, CoreError> {
        self.save_in_flight = false;
        let outcome = result?;
        if let Some(mapping) = &outcome.id_mapping {
            if self.is_alive() {
                self.dispatch(Action::ApplyMapping(mapping.clone()))?;
            }
        }
        Ok(outcome)
    }

    pub fn save_with(&mut self, backend: &dyn FinanceBackend) -> Result<SaveOutcome, CoreError> {
        let snapshot = self.begin_save()?;
        let result = backend.save(&snapshot);
        self.finish_save(result)
    }

    pub fn load_with(&mut self, backend: &dyn FinanceBackend) -> Result<LoadCommit, CoreError> {
        let token = self.begin_request();
        let result = backend.load();
        self.commit_load(token, result)
    }
}
