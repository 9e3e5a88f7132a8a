use leptos::prelude::*;
use stockdesk::AppRoute;
use stockdesk::views::navbar::ProfileMenu;

use crate::auth::use_auth;
use crate::web::router::{Link, use_router};

const NAV_LINKS: [AppRoute; 4] = [
    AppRoute::Dashboard,
    AppRoute::Products,
    AppRoute::StockOverview,
    AppRoute::Analytics,
];

/// Top bar for signed-in users; hidden for anonymous visitors.
#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let session = auth.session();

    let menu = StoredValue::new_local(ProfileMenu::new());
    let open = RwSignal::new(false);

    let on_toggle = move |_| {
        open.set(menu.with_value(|m| m.toggle()));
    };

    let on_logout = move |_| {
        let feedback = menu.with_value(|m| m.logout(&*auth.manager()));
        open.set(false);
        if let Some(route) = feedback.navigate {
            router.navigate(route);
        }
    };

    move || {
        let current = session.get();
        current.token.as_ref()?;

        let name = current
            .user
            .as_ref()
            .map(|u| u.name.clone())
            .unwrap_or_default();
        let email = current.user.map(|u| u.email).unwrap_or_default();

        Some(view! {
            <div class="navbar bg-base-100 shadow-sm">
                <div class="flex-1">
                    <Link to=AppRoute::Landing class="btn btn-ghost text-xl">"Stockdesk"</Link>
                </div>
                <div class="flex-none gap-2">
                    <ul class="menu menu-horizontal px-1">
                        {NAV_LINKS
                            .into_iter()
                            .map(|route| {
                                view! {
                                    <li>
                                        <Link to=route>{route.title()}</Link>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                    <div class="dropdown dropdown-end" class:dropdown-open=move || open.get()>
                        <button class="btn btn-ghost btn-circle avatar placeholder" on:click=on_toggle>
                            <div class="bg-neutral text-neutral-content w-10 rounded-full">
                                <span>{name.chars().next().map(String::from).unwrap_or_default()}</span>
                            </div>
                        </button>
                        <Show when=move || open.get()>
                            <ul class="menu dropdown-content bg-base-100 rounded-box z-10 w-52 p-2 shadow">
                                <li class="menu-title">{name.clone()}</li>
                                <li class="text-xs opacity-60 px-4">{email.clone()}</li>
                                <li><button on:click=on_logout>"Logout"</button></li>
                            </ul>
                        </Show>
                    </div>
                </div>
            </div>
        })
    }
}
