use std::fs;

use chrono::NaiveDate;
use pitaka_core::{CoreError, FinanceBackend, LoadCommit, RecordKind, Session};
use pitaka_domain::{DeductionKind, Expense, ExpenseCategory, FinancialData, IncomeEntry};
use pitaka_storage_json::{JsonFinanceStore, StoragePaths};
use tempfile::tempdir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample() -> FinancialData {
    FinancialData::new(
        vec![
            IncomeEntry::new(day(2024, 3, 1), 1000.0).with_id("abc123"),
            IncomeEntry::new(day(2024, 3, 15), 1000.0)
                .with_deduction(DeductionKind::Sss, 100.0)
                .with_deduction(DeductionKind::Pagibig, 50.0),
        ],
        vec![
            Expense::new(day(2024, 3, 2), ExpenseCategory::Food, 300.0).with_description("groceries"),
            Expense::new(day(2024, 3, 16), ExpenseCategory::Bills, 700.0),
        ],
    )
}

#[test]
fn save_then_load_returns_records_newest_first() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFinanceStore::new(StoragePaths::under(dir.path()), "maria").expect("store");

    let outcome = store.save(&sample()).expect("save");
    assert_eq!(outcome.saved.income, 2);
    assert_eq!(outcome.saved.expenses, 2);
    let mapping = outcome.id_mapping.expect("legacy id remapped");
    assert_eq!(mapping.income.len(), 1);
    assert!(mapping.expenses.is_empty());

    let loaded = store.load().expect("load");
    assert_eq!(loaded.income_history[0].date, day(2024, 3, 15));
    assert_eq!(loaded.expenses[0].date, day(2024, 3, 16));
    assert_eq!(loaded.expenses[1].description, "groceries");
    assert!(loaded.income_history.iter().all(|entry| entry.id.is_canonical()));

    let raw = fs::read_to_string(store.document_path()).expect("document");
    assert!(raw.contains("\"weekly_salary\""));
    assert!(raw.contains("\"user_id\": \"maria\""));
}

#[test]
fn saves_upsert_by_id() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFinanceStore::new(StoragePaths::under(dir.path()), "maria").expect("store");
    let mut session = Session::new(sample());
    session.save_with(&store).expect("first save");

    let mut edited = session.data().expenses[1].clone();
    edited.amount = 750.0;
    session
        .dispatch(pitaka_core::Action::UpdateExpense(edited))
        .expect("edit");
    session.save_with(&store).expect("second save");

    let loaded = store.load().expect("load");
    assert_eq!(loaded.expenses.len(), 2);
    assert_eq!(loaded.expenses[0].amount, 750.0);
}

#[test]
fn legacy_rows_are_replaced_not_duplicated() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFinanceStore::new(StoragePaths::under(dir.path()), "maria").expect("store");
    fs::write(
        store.document_path(),
        r#"{
            "income_history": [
                {"id":"abc123","user_id":"maria","date":"2024-03-01","weekly_salary":1000}
            ],
            "expenses": [
                {"id":"x1","user_id":"maria","date":"2024-03-02","category":"Food","amount":300},
                {"id":"x1","user_id":"maria","date":"2024-03-03","category":"Bills","amount":700}
            ]
        }"#,
    )
    .expect("write legacy document");

    let mut session = Session::new(FinancialData::default());
    assert_eq!(session.load_with(&store).expect("load"), LoadCommit::Applied);
    let outcome = session.save_with(&store).expect("save");
    assert_eq!(outcome.saved.income, 1);
    assert_eq!(outcome.saved.expenses, 2);

    let stored = store.load().expect("reload");
    assert_eq!(stored.income_history.len(), 1);
    assert_eq!(stored.expenses.len(), 2);
    assert!(stored
        .income_history
        .iter()
        .map(|entry| &entry.id)
        .chain(stored.expenses.iter().map(|expense| &expense.id))
        .all(|id| id.is_canonical()));
    let mut amounts: Vec<f64> = stored.expenses.iter().map(|expense| expense.amount).collect();
    amounts.sort_by(f64::total_cmp);
    assert_eq!(amounts, vec![300.0, 700.0]);

    let mut in_memory: Vec<_> = session.data().expenses.iter().map(|e| e.id.clone()).collect();
    let mut on_disk: Vec<_> = stored.expenses.iter().map(|e| e.id.clone()).collect();
    in_memory.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    on_disk.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    assert_eq!(in_memory, on_disk);
}

#[test]
fn remove_drops_stored_row() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFinanceStore::new(StoragePaths::under(dir.path()), "maria").expect("store");
    let data = sample();
    store.save(&data).expect("save");

    let id = data.expenses[0].id.clone();
    assert!(store.remove(RecordKind::Expense, &id).expect("remove"));
    assert!(!store.remove(RecordKind::Expense, &id).expect("second remove"));
    assert_eq!(store.load().expect("load").expenses.len(), 1);
}

#[test]
fn overwrites_keep_a_bounded_number_of_backups() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFinanceStore::with_retention(StoragePaths::under(dir.path()), "maria", 2)
        .expect("store");
    for _ in 0..5 {
        store.save(&sample()).expect("save");
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    let backups = store.list_backups().expect("backups");
    assert_eq!(backups.len(), 2);
    assert!(backups[0].id > backups[1].id);
    assert!(backups.iter().all(|backup| backup.created_at.is_some()));
}

#[test]
fn missing_document_loads_empty() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFinanceStore::new(StoragePaths::under(dir.path()), "nobody").expect("store");
    assert!(store.load().expect("load").is_empty());
    let outcome = store.save(&FinancialData::default()).expect("empty save");
    assert_eq!(outcome.saved.total(), 0);
    assert!(!store.document_path().exists());
}

#[test]
fn malformed_dates_fail_the_load() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFinanceStore::new(StoragePaths::under(dir.path()), "maria").expect("store");
    fs::write(
        store.document_path(),
        r#"{"income_history":[{"id":"x","user_id":"maria","date":"2024-02-30","weekly_salary":10}],"expenses":[]}"#,
    )
    .expect("write");
    let err = store.load().unwrap_err();
    assert!(matches!(err, CoreError::InvalidDate(raw) if raw == "2024-02-30"));
}
