use super::*;

fn row(id: Id, cells: &[&str]) -> Row {
    let cells: Vec<String> = cells.iter().map(|c| (*c).to_owned()).collect();
    let search_text = cells.join(" ").to_lowercase();
    Row { id, cells, search_text, values: FormValues::new() }
}

fn sample_rows() -> Vec<Row> {
    vec![
        row(1, &["1", "Rust basics", "beginner", "49.00"]),
        row(2, &["2", "Advanced Rust", "advanced", "199.00"]),
        row(3, &["3", "Async in practice", "intermediate", "120.00"]),
        row(4, &["4", "Web with Leptos", "intermediate", "9.50"]),
        row(5, &["5", "Testing", "beginner", "0.00"]),
    ]
}

fn ids(page: &TablePage) -> Vec<Id> {
    page.rows.iter().map(|r| r.id).collect()
}

// =============================================================
// Search & filter
// =============================================================

#[test]
fn empty_query_returns_first_page_of_everything() {
    let page = apply(&sample_rows(), &TableQuery::default());
    assert_eq!(page.total, 5);
    assert_eq!(page.page_count, 1);
    assert_eq!(ids(&page), vec![1, 2, 3, 4, 5]);
}

#[test]
fn search_is_case_insensitive_substring() {
    let mut query = TableQuery::default();
    query.set_search("  RUST ");
    let page = apply(&sample_rows(), &query);
    assert_eq!(ids(&page), vec![1, 2]);
    assert_eq!(page.total, 2);
}

#[test]
fn column_filter_matches_exact_cell() {
    let mut query = TableQuery::default();
    query.set_filter(2, "intermediate");
    assert_eq!(ids(&apply(&sample_rows(), &query)), vec![3, 4]);

    query.set_filter(2, "");
    assert_eq!(query.filter, None);
}

#[test]
fn search_and_filter_combine() {
    let mut query = TableQuery::default();
    query.set_search("leptos");
    query.set_filter(2, "intermediate");
    assert_eq!(ids(&apply(&sample_rows(), &query)), vec![4]);
}

// =============================================================
// Sorting
// =============================================================

#[test]
fn sort_compares_numbers_numerically() {
    let mut query = TableQuery::default();
    query.toggle_sort(3);
    assert_eq!(ids(&apply(&sample_rows(), &query)), vec![5, 4, 1, 3, 2]);
}

#[test]
fn sort_toggle_cycles_asc_desc_none() {
    let mut query = TableQuery::default();
    query.toggle_sort(1);
    assert_eq!(query.sort, Some((1, SortDirection::Ascending)));
    assert_eq!(ids(&apply(&sample_rows(), &query)), vec![2, 3, 1, 5, 4]);

    query.toggle_sort(1);
    assert_eq!(query.sort, Some((1, SortDirection::Descending)));
    assert_eq!(ids(&apply(&sample_rows(), &query)), vec![4, 5, 1, 3, 2]);

    query.toggle_sort(1);
    assert_eq!(query.sort, None);

    query.toggle_sort(1);
    query.toggle_sort(2);
    assert_eq!(query.sort, Some((2, SortDirection::Ascending)));
}

#[test]
fn sort_orders_iso_dates_and_suffixed_numbers() {
    let rows = vec![
        row(1, &["2026-11-02", "45 min", "12/20"]),
        row(2, &["2026-03-15", "5 min", "2/20"]),
        row(3, &["2025-12-31", "120 min", "20/20"]),
    ];
    let mut query = TableQuery::default();
    query.toggle_sort(0);
    assert_eq!(ids(&apply(&rows, &query)), vec![3, 2, 1]);

    query.toggle_sort(1);
    assert_eq!(ids(&apply(&rows, &query)), vec![2, 1, 3]);

    query.toggle_sort(2);
    assert_eq!(ids(&apply(&rows, &query)), vec![2, 1, 3]);
}

// =============================================================
// Pagination
// =============================================================

#[test]
fn pagination_slices_and_counts_pages() {
    let query = TableQuery { per_page: 2, page: 2, ..TableQuery::default() };
    let page = apply(&sample_rows(), &query);
    assert_eq!(ids(&page), vec![3, 4]);
    assert_eq!(page.page_count, 3);
    assert!(page.has_previous());
    assert!(page.has_next());
}

#[test]
fn page_beyond_range_is_clamped_to_last() {
    let query = TableQuery { per_page: 2, page: 99, ..TableQuery::default() };
    let page = apply(&sample_rows(), &query);
    assert_eq!(page.page, 3);
    assert_eq!(ids(&page), vec![5]);
    assert!(!page.has_next());
}

#[test]
fn no_matches_still_reports_one_page() {
    let mut query = TableQuery { page: 4, ..TableQuery::default() };
    query.search = "nothing matches this".to_owned();
    let page = apply(&sample_rows(), &query);
    assert_eq!(page.total, 0);
    assert_eq!(page.page, 1);
    assert_eq!(page.page_count, 1);
    assert!(page.rows.is_empty());
}

#[test]
fn set_search_resets_page() {
    let mut query = TableQuery { page: 3, ..TableQuery::default() };
    query.set_search("rust");
    assert_eq!(query.page, 1);
}

#[test]
fn distinct_values_are_sorted_and_unique() {
    assert_eq!(
        distinct_values(&sample_rows(), 2),
        vec!["advanced".to_owned(), "beginner".to_owned(), "intermediate".to_owned()]
    );
}
