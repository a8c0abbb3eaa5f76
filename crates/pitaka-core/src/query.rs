use std::cmp::Reverse;

use pitaka_domain::{Expense, ExpenseCategory};

/// Rows per page of the expense list.
pub const EXPENSES_PER_PAGE: usize = 6;

/// Search, filter and paging options for the expense list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseQuery {
    pub search: Option<String>,
    pub category: Option<ExpenseCategory>,
    /// 1-based; values below 1 are treated as the first page.
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpensePage<'a> {
    pub items: Vec<&'a Expense>,
    pub page: usize,
    pub total_pages: usize,
    /// Number of expenses matching the query across all pages.
    pub total_matches: usize,
}

impl<'a> ExpensePage<'a> {
    /// 1-based position of the first row on this page, 0 when empty.
    pub fn first_row(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * EXPENSES_PER_PAGE + 1
        }
    }

    pub fn last_row(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_row() + self.items.len() - 1
        }
    }
}

impl ExpenseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() {
            None
        } else {
            Some(term)
        };
        self
    }

    pub fn category(mut self, category: ExpenseCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        if self.category.is_some_and(|category| category != expense.category) {
            return false;
        }
        match &self.search {
            Some(term) => {
                let needle = term.to_lowercase();
                expense.description.to_lowercase().contains(&needle)
                    || expense.category.label().to_lowercase().contains(&needle)
            }
            None => true,
        }
    }

    /// Applies the query. Matches are ordered newest first; pages past the end are clamped.
    pub fn run<'a>(&self, expenses: &'a [Expense]) -> ExpensePage<'a> {
        let mut matches: Vec<&Expense> = expenses.iter().filter(|e| self.matches(e)).collect();
        matches.sort_by_key(|expense| Reverse(expense.date));

        let total_matches = matches.len();
        let total_pages = total_matches.div_ceil(EXPENSES_PER_PAGE).max(1);
        let page = self.page.clamp(1, total_pages);
        let items = matches
            .into_iter()
            .skip((page - 1) * EXPENSES_PER_PAGE)
            .take(EXPENSES_PER_PAGE)
            .collect();

        ExpensePage {
            items,
            page,
            total_pages,
            total_matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn expenses() -> Vec<Expense> {
        let base = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        (0..8)
            .map(|offset| {
                let category = if offset % 2 == 0 {
                    ExpenseCategory::Food
                } else {
                    ExpenseCategory::Transportation
                };
                Expense::new(base + Duration::days(offset), category, 10.0 * offset as f64)
                    .with_description(format!("item {offset}"))
            })
            .collect()
    }

    #[test]
    fn pages_newest_first() {
        let data = expenses();
        let first = ExpenseQuery::new().run(&data);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.items.len(), 6);
        assert_eq!(first.items[0].description, "item 7");
        assert_eq!((first.first_row(), first.last_row()), (1, 6));

        let second = ExpenseQuery::new().page(2).run(&data);
        assert_eq!(second.items.len(), 2);
        assert_eq!(second.items[1].description, "item 0");
        assert_eq!((second.first_row(), second.last_row()), (7, 8));
    }

    #[test]
    fn search_matches_description_or_category_case_insensitively() {
        let data = expenses();
        let by_category = ExpenseQuery::new().search("TRANSPORT").run(&data);
        assert_eq!(by_category.total_matches, 4);

        let by_description = ExpenseQuery::new().search("item 3").run(&data);
        assert_eq!(by_description.total_matches, 1);
    }

    #[test]
    fn category_filter_combines_with_search() {
        let data = expenses();
        let page = ExpenseQuery::new()
            .category(ExpenseCategory::Food)
            .search("item")
            .run(&data);
        assert_eq!(page.total_matches, 4);
        assert!(page.items.iter().all(|e| e.category == ExpenseCategory::Food));
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let data = expenses();
        assert_eq!(ExpenseQuery::new().page(9).run(&data).page, 2);
        let empty = ExpenseQuery::new().search("nothing").run(&data);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 1);
        assert_eq!(empty.first_row(), 0);
    }
}
