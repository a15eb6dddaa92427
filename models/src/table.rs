//! Client-side search, filter, sort and pagination for data tables.
//!
//! SYSTEM CONTEXT
//! ==============
//! List screens fetch a whole collection once and then slice it locally on
//! every keystroke. Rows are already flattened to display strings by
//! [`crate::Tabular`], so the query works on any resource kind.

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;

use std::cmp::Ordering;

use crate::entities::Id;
use crate::validation::FormValues;

pub const DEFAULT_PER_PAGE: usize = 10;

/// A resource flattened for display.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub id: Id,
    pub cells: Vec<String>,
    /// Lowercased concatenation of the cells.
    pub search_text: String,
    /// Values used to prefill the edit dialog.
    pub values: FormValues,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Exact-match filter on one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnFilter {
    pub column: usize,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableQuery {
    pub search: String,
    pub filter: Option<ColumnFilter>,
    pub sort: Option<(usize, SortDirection)>,
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self { search: String::new(), filter: None, sort: None, page: 1, per_page: DEFAULT_PER_PAGE }
    }
}

impl TableQuery {
    /// Cycle sorting on `column`: ascending, descending, then unsorted.
    pub fn toggle_sort(&mut self, column: usize) {
        self.sort = match self.sort {
            Some((current, SortDirection::Ascending)) if current == column => {
                Some((column, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == column => None,
            _ => Some((column, SortDirection::Ascending)),
        };
    }

    /// Replace the search term and go back to the first page.
    pub fn set_search(&mut self, search: &str) {
        search.clone_into(&mut self.search);
        self.page = 1;
    }

    /// Replace the column filter (empty value clears it) and go back to the first page.
    pub fn set_filter(&mut self, column: usize, value: &str) {
        self.filter = (!value.is_empty()).then(|| ColumnFilter { column, value: value.to_owned() });
        self.page = 1;
    }
}

/// One page of query results.
#[derive(Clone, Debug, PartialEq)]
pub struct TablePage {
    pub rows: Vec<Row>,
    /// Number of rows matching search and filter, across all pages.
    pub total: usize,
    pub page: usize,
    pub page_count: usize,
}

impl TablePage {
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

/// Apply `query` to `rows`.
///
/// Search is a case-insensitive substring match on [`Row::search_text`].
/// Sorting is stable and compares numerically when both cells parse as
/// numbers. The requested page is clamped into range.
#[must_use]
pub fn apply(rows: &[Row], query: &TableQuery) -> TablePage {
    let needle = query.search.trim().to_lowercase();
    let mut matched: Vec<&Row> = rows
        .iter()
        .filter(|row| needle.is_empty() || row.search_text.contains(&needle))
        .filter(|row| {
            query
                .filter
                .as_ref()
                .is_none_or(|f| row.cells.get(f.column).is_some_and(|cell| *cell == f.value))
        })
        .collect();

    if let Some((column, direction)) = query.sort {
        matched.sort_by(|a, b| {
            let ordering = compare_cells(a.cells.get(column), b.cells.get(column));
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    let per_page = query.per_page.max(1);
    let total = matched.len();
    let page_count = total.div_ceil(per_page).max(1);
    let page = query.page.clamp(1, page_count);
    let rows = matched
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();

    TablePage { rows, total, page, page_count }
}

fn compare_cells(a: Option<&String>, b: Option<&String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (leading_number(a), leading_number(b)) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => a.to_lowercase().cmp(&b.to_lowercase()),
        },
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Parse the numeric prefix of a cell such as `"45 min"`, `"70%"` or `"12/20"`.
/// ISO dates are left to the lexical comparison, which already orders them.
fn leading_number(cell: &str) -> Option<f64> {
    let end = cell
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && *c == '-')))
        .map_or(cell.len(), |(i, _)| i);
    let (prefix, rest) = cell.split_at(end);
    if prefix.is_empty() || !(rest.is_empty() || rest.starts_with([' ', '%', '/'])) {
        return None;
    }
    prefix.parse().ok()
}

/// Distinct values of `column`, sorted, for filter dropdowns.
#[must_use]
pub fn distinct_values(rows: &[Row], column: usize) -> Vec<String> {
    let mut values: Vec<String> = rows.iter().filter_map(|row| row.cells.get(column).cloned()).collect();
    values.sort();
    values.dedup();
    values
}
