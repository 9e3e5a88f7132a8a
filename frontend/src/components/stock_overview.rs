use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use stockdesk::views::format_money;
use stockdesk::views::stock_overview::StockOverviewController;

use crate::auth::use_auth;
use crate::components::toast::use_toaster;

#[component]
pub fn StockOverviewPage() -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();
    let controller = StoredValue::new_local(Rc::new(StockOverviewController::new(auth.api())));
    let tick = RwSignal::new(0u64);

    {
        let controller = controller.get_value();
        spawn_local(async move {
            toaster.show_opt(controller.mount().await);
            tick.update(|t| *t = t.wrapping_add(1));
        });
    }
    on_cleanup(move || {
        controller.try_with_value(|c| c.unmount());
    });

    let summary = move || {
        tick.get();
        controller.with_value(|c| c.summary())
    };
    let is_loading = move || {
        tick.get();
        controller.with_value(|c| c.is_loading())
    };

    view! {
        <div class="min-h-screen bg-base-200 p-8 space-y-8">
            <h1 class="text-3xl font-bold">"Stock Overview"</h1>
            {move || {
                if is_loading() {
                    return view! { <span class="loading loading-spinner loading-lg"></span> }
                        .into_any();
                }
                let Some(summary) = summary() else {
                    return view! { <p class="opacity-70">"No stock data available."</p> }
                        .into_any();
                };
                view! {
                    <div class="stats shadow bg-base-100">
                        <div class="stat">
                            <div class="stat-title">"Items in Stock"</div>
                            <div class="stat-value">{summary.total_items}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"Items Sold"</div>
                            <div class="stat-value">{summary.total_sold}</div>
                        </div>
                        <div class="stat">
                            <div class="stat-title">"Revenue"</div>
                            <div class="stat-value">{format_money(summary.total_revenue)}</div>
                        </div>
                    </div>
                    <div class="card bg-base-100 shadow overflow-x-auto">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Product"</th>
                                    <th>"Category"</th>
                                    <th>"Sold"</th>
                                    <th>"Revenue"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {summary
                                    .sold_items
                                    .into_iter()
                                    .map(|item| {
                                        view! {
                                            <tr>
                                                <td>{item.name}</td>
                                                <td>{item.category}</td>
                                                <td>{item.quantity_sold}</td>
                                                <td>{format_money(item.revenue_generated)}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
