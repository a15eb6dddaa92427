//! Generic admin data table with search, filter, sort and pagination.
//!
//! The table only edits `ResourceState::query` and opens dialogs; the page
//! owns fetching and mutations.

use leptos::prelude::*;
use models::table::{SortDirection, distinct_values};
use models::{Id, ResourceKind};

use crate::state::resources::{ResourceState, RowActions, filter_column};

#[component]
pub fn DataTable(kind: ResourceKind, state: RwSignal<ResourceState>, actions: RowActions) -> impl IntoView {
    let columns = kind.columns();
    let filter_col = filter_column(kind);

    let sort_marker = move |column: usize| match state.get().query.sort {
        Some((current, SortDirection::Ascending)) if current == column => " ▲",
        Some((current, SortDirection::Descending)) if current == column => " ▼",
        _ => "",
    };

    let filter_options = move || {
        filter_col
            .map(|column| distinct_values(&state.get().rows, column))
            .unwrap_or_default()
    };

    let on_search = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        state.update(|s| s.query.set_search(&value));
    };

    let row_action = move |id: Id, open: fn(&mut ResourceState, Id)| {
        move |_: leptos::ev::MouseEvent| state.update(|s| open(s, id))
    };

    view! {
        <div class="data-table">
            <div class="data-table__controls">
                <input
                    class="data-table__search"
                    type="search"
                    placeholder="Search…"
                    prop:value=move || state.get().query.search
                    on:input=on_search
                />
                {filter_col
                    .map(|column| {
                        view! {
                            <select
                                class="data-table__filter"
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    state.update(|s| s.query.set_filter(column, &value));
                                }
                            >
                                <option value="">{format!("All {}", columns[column].to_lowercase())}</option>
                                {move || {
                                    filter_options()
                                        .into_iter()
                                        .map(|value| view! { <option value=value.clone()>{value.clone()}</option> })
                                        .collect::<Vec<_>>()
                                }}
                            </select>
                        }
                    })}
            </div>

            <table class="data-table__table">
                <thead>
                    <tr>
                        {columns
                            .iter()
                            .enumerate()
                            .map(|(index, title)| {
                                view! {
                                    <th
                                        class="data-table__header"
                                        on:click=move |_| state.update(|s| s.query.toggle_sort(index))
                                    >
                                        {*title}
                                        {move || sort_marker(index)}
                                    </th>
                                }
                            })
                            .collect::<Vec<_>>()}
                        <th class="data-table__header data-table__header--actions">"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let page = state.get().page();
                        if page.rows.is_empty() {
                            let message = if state.get().loading { "Loading…" } else { "No results." };
                            return view! {
                                <tr>
                                    <td class="empty-state" colspan={columns.len() + 1}>{message}</td>
                                </tr>
                            }
                            .into_any();
                        }
                        page.rows
                            .into_iter()
                            .map(|row| {
                                let id = row.id;
                                view! {
                                    <tr>
                                        {row
                                            .cells
                                            .into_iter()
                                            .map(|cell| view! { <td>{cell}</td> })
                                            .collect::<Vec<_>>()}
                                        <td class="data-table__actions">
                                            <Show when=move || actions.edit>
                                                <button class="btn" on:click=row_action(id, ResourceState::open_edit)>
                                                    "Edit"
                                                </button>
                                            </Show>
                                            <Show when=move || actions.upload>
                                                <button class="btn" on:click=row_action(id, ResourceState::open_upload)>
                                                    "Upload"
                                                </button>
                                            </Show>
                                            <Show when=move || actions.delete>
                                                <button
                                                    class="btn btn--danger"
                                                    on:click=row_action(id, ResourceState::open_delete)
                                                >
                                                    "Delete"
                                                </button>
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect::<Vec<_>>()
                            .into_any()
                    }}
                </tbody>
            </table>

            <div class="data-table__pager">
                <button
                    class="btn"
                    disabled=move || !state.get().page().has_previous()
                    on:click=move |_| state.update(|s| s.query.page = s.query.page.saturating_sub(1).max(1))
                >
                    "Previous"
                </button>
                <span class="data-table__page">
                    {move || {
                        let page = state.get().page();
                        format!("Page {} of {} · {} rows", page.page, page.page_count.max(1), page.total)
                    }}
                </span>
                <button
                    class="btn"
                    disabled=move || !state.get().page().has_next()
                    on:click=move |_| state.update(|s| s.query.page += 1)
                >
                    "Next"
                </button>
            </div>
        </div>
    }
}
