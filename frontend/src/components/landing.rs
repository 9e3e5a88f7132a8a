use leptos::prelude::*;
use stockdesk::AppRoute;
use stockdesk::views::{NavCard, landing};

use crate::auth::use_auth;
use crate::web::router::{Link, use_router};

#[component]
pub fn LandingPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let session = auth.session();

    let card = move |card: NavCard| {
        let on_click = move |_| {
            let target = landing::target_for(card.route, &session.get_untracked());
            router.navigate(target);
        };
        view! {
            <div class="card bg-base-100 shadow-xl cursor-pointer hover:shadow-2xl" on:click=on_click>
                <div class="card-body">
                    <h2 class="card-title">{card.title}</h2>
                    <p>{card.description}</p>
                </div>
            </div>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="hero py-16">
                <div class="hero-content text-center">
                    <div class="max-w-xl">
                        <h1 class="text-5xl font-bold">"Stock Management"</h1>
                        <p class="py-6">"Track products, sales and revenue in one place."</p>
                        // Signed-in visitors get the profile menu from the navbar instead.
                        <Show when=move || session.get().token.is_none()>
                            <div class="flex justify-center gap-4">
                                <Link to=AppRoute::Login class="btn btn-primary">"Login"</Link>
                                <Link to=AppRoute::Register class="btn btn-outline">"Register"</Link>
                            </div>
                        </Show>
                    </div>
                </div>
            </div>
            <div class="grid gap-6 px-8 pb-16 md:grid-cols-2 lg:grid-cols-4">
                {move || {
                    landing::cards(&session.get()).into_iter().map(card).collect_view()
                }}
            </div>
        </div>
    }
}
