use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use stockdesk::shared::{SortBy, SortOrder};
use stockdesk::views::analytics::{AnalyticsController, ChartSeries};
use stockdesk::views::format_money;
use stockdesk::Notice;

use crate::auth::use_auth;
use crate::components::toast::use_toaster;

fn parse_sort_by(value: &str) -> SortBy {
    match value {
        "totalSold" => SortBy::TotalSold,
        _ => SortBy::TotalRevenue,
    }
}

fn parse_order(value: &str) -> SortOrder {
    match value {
        "asc" => SortOrder::Asc,
        _ => SortOrder::Desc,
    }
}

/// Horizontal bars per dataset, scaled to that dataset's maximum.
fn bar_chart(series: ChartSeries) -> impl IntoView {
    let labels = series.labels;
    series
        .datasets
        .into_iter()
        .map(|dataset| {
            let max = dataset.data.iter().copied().fold(0.0_f64, f64::max);
            let bars = labels
                .iter()
                .zip(dataset.data)
                .map(|(label, value)| {
                    let width = if max > 0.0 { value / max * 100.0 } else { 0.0 };
                    view! {
                        <div class="flex items-center gap-2">
                            <span class="w-32 truncate text-sm">{label.clone()}</span>
                            <progress class="progress progress-primary flex-1" value={width.to_string()} max="100"></progress>
                            <span class="w-24 text-right text-sm">{format!("{:.2}", value)}</span>
                        </div>
                    }
                })
                .collect_view();
            view! {
                <div class="card bg-base-100 shadow">
                    <div class="card-body">
                        <h2 class="card-title">{dataset.label}</h2>
                        {bars}
                    </div>
                </div>
            }
        })
        .collect_view()
}

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();
    let controller = StoredValue::new_local(Rc::new(AnalyticsController::new(auth.api())));
    let tick = RwSignal::new(0u64);
    let bump = move || tick.update(|t| *t = t.wrapping_add(1));

    let report = move |controller: &AnalyticsController| {
        if let Some(message) = controller.error() {
            toaster.show(Notice::error(message));
        }
        bump();
    };

    {
        let controller = controller.get_value();
        spawn_local(async move {
            controller.mount().await;
            report(&controller);
        });
    }
    on_cleanup(move || {
        controller.try_with_value(|c| c.unmount());
    });

    let on_sort_by = move |ev: web_sys::Event| {
        let sort_by = parse_sort_by(&event_target_value(&ev));
        let controller = controller.get_value();
        spawn_local(async move {
            if controller.set_sort_by(sort_by).await.is_some() {
                report(&controller);
            }
        });
    };

    let on_order = move |ev: web_sys::Event| {
        let order = parse_order(&event_target_value(&ev));
        let controller = controller.get_value();
        spawn_local(async move {
            if controller.set_order(order).await.is_some() {
                report(&controller);
            }
        });
    };

    let on_filter = move |ev: web_sys::Event| {
        controller.with_value(|c| c.set_filter(&event_target_value(&ev)));
        bump();
    };

    let rows = move || {
        tick.get();
        controller.with_value(|c| c.visible_rows())
    };
    let chart = move || {
        tick.get();
        controller.with_value(|c| c.chart())
    };
    let is_loading = move || {
        tick.get();
        controller.with_value(|c| c.is_loading())
    };

    view! {
        <div class="min-h-screen bg-base-200 p-8 space-y-8">
            <h1 class="text-3xl font-bold">"Analytics"</h1>

            <div class="flex flex-wrap gap-4">
                <input
                    type="text"
                    placeholder="Filter by name or category"
                    class="input input-bordered"
                    prop:value=move || {
                        tick.get();
                        controller.with_value(|c| c.filter())
                    }
                    on:input=on_filter
                />
                <select class="select select-bordered" on:change=on_sort_by>
                    <option value={SortBy::TotalRevenue.as_str()}>"Total Revenue"</option>
                    <option value={SortBy::TotalSold.as_str()}>"Total Sold"</option>
                </select>
                <select class="select select-bordered" on:change=on_order>
                    <option value={SortOrder::Desc.as_str()}>"Descending"</option>
                    <option value={SortOrder::Asc.as_str()}>"Ascending"</option>
                </select>
            </div>

            <div class="card bg-base-100 shadow overflow-x-auto">
                <Show
                    when=move || !is_loading()
                    fallback=|| view! { <span class="loading loading-spinner loading-lg m-8"></span> }
                >
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Product"</th>
                                <th>"Category"</th>
                                <th>"Items Sold"</th>
                                <th>"Total Revenue"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                rows()
                                    .into_iter()
                                    .map(|row| {
                                        view! {
                                            <tr>
                                                <td>{row.name}</td>
                                                <td>{row.category}</td>
                                                <td>{row.items_sold}</td>
                                                <td>{format_money(row.total_revenue)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </Show>
            </div>

            <div class="grid gap-6 md:grid-cols-2">
                {move || chart().map(bar_chart)}
            </div>
        </div>
    }
}
