//! Dashboard tiles and the monthly bar chart.

use leptos::prelude::*;
use models::stats::{MonthlyAmount, StatCard, bar_heights, format_amount};

#[component]
pub fn StatCardView(card: StatCard) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-card__label">{card.label}</span>
            <span class="stat-card__value">{card.value}</span>
            {card.hint.map(|hint| view! { <span class="stat-card__hint">{hint}</span> })}
        </div>
    }
}

#[component]
pub fn StatGrid(cards: Vec<StatCard>) -> impl IntoView {
    view! {
        <div class="stat-grid">
            {cards.into_iter().map(|card| view! { <StatCardView card/> }).collect::<Vec<_>>()}
        </div>
    }
}

/// Vertical bars normalised to the largest month.
#[component]
pub fn BarChart(title: &'static str, series: Vec<MonthlyAmount>) -> impl IntoView {
    let amounts: Vec<f64> = series.iter().map(|m| m.amount).collect();
    let heights = bar_heights(&amounts);

    view! {
        <section class="bar-chart">
            <h3 class="bar-chart__title">{title}</h3>
            <Show
                when={
                    let empty = series.is_empty();
                    move || !empty
                }
                fallback=|| view! { <p class="empty-state">"No data yet."</p> }
            >
                <div class="bar-chart__bars">
                    {series
                        .iter()
                        .zip(heights.iter())
                        .map(|(month, height)| {
                            view! {
                                <div class="bar-chart__column" title=format_amount(month.amount)>
                                    <div class="bar-chart__bar" style=format!("height: {height:.1}%")></div>
                                    <span class="bar-chart__label">{month.month.clone()}</span>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            </Show>
        </section>
    }
}
