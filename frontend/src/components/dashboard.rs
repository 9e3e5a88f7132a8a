use leptos::prelude::*;
use stockdesk::views::dashboard;

use crate::auth::use_auth;
use crate::web::router::use_router;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let session = auth.session();

    view! {
        <div class="min-h-screen bg-base-200 p-8">
            <h1 class="text-3xl font-bold mb-8">
                {move || dashboard::greeting(session.get().user.as_ref())}
            </h1>
            <div class="grid gap-6 md:grid-cols-3">
                {dashboard::CARDS
                    .into_iter()
                    .map(|card| {
                        view! {
                            <div
                                class="card bg-base-100 shadow-xl cursor-pointer hover:shadow-2xl"
                                on:click=move |_| router.navigate(card.route)
                            >
                                <div class="card-body">
                                    <h2 class="card-title">{card.title}</h2>
                                    <p>{card.description}</p>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
