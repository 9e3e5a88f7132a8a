//! History-API router.
//!
//! All `window.history` access lives here. Navigation only moves the
//! current route; whether that route may render is decided reactively by
//! [`stockdesk::guard::resolve`] against the live session.

use leptos::prelude::*;
use log::info;
use stockdesk::guard::{self, Resolution};
use stockdesk::{AppRoute, Session};
use wasm_bindgen::prelude::*;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

fn replace_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

fn set_document_title(route: AppRoute) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(&format!("{} | Stockdesk", route.title()));
    }
}

#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    session: Signal<Session>,
}

impl RouterService {
    fn new(session: Signal<Session>) -> Self {
        let (current_route, set_route) = signal(AppRoute::from_path(&current_path()));
        Self {
            current_route,
            set_route,
            session,
        }
    }

    /// What the outlet should show for the current route right now.
    pub fn resolution(&self) -> Resolution {
        guard::resolve(self.current_route.get(), &self.session.get())
    }

    pub fn navigate(&self, route: AppRoute) {
        if route == self.current_route.get_untracked() {
            return;
        }
        push_history_state(route.to_path());
        self.set_route.set(route);
    }

    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            set_route.set(AppRoute::from_path(&current_path()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Lives as long as the page.
        closure.forget();
    }

    /// Re-runs the guard whenever the route or the session changes and
    /// replaces the history entry when it redirects.
    fn setup_guard(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session = self.session;

        Effect::new(move |_| {
            let route = current_route.get();
            match guard::resolve(route, &session.get()) {
                Resolution::Redirect(target) => {
                    info!("router: {} -> {}", route, target);
                    replace_history_state(target.to_path());
                    set_route.set(target);
                }
                Resolution::Show(shown) => set_document_title(shown),
                Resolution::Loading(_) => {}
            }
        });
    }
}

fn provide_router(session: Signal<Session>) -> RouterService {
    let router = RouterService::new(session);
    router.init_popstate_listener();
    router.setup_guard();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

#[component]
pub fn Router(session: Signal<Session>, children: Children) -> impl IntoView {
    provide_router(session);
    children()
}

/// Renders `matcher(route)` once the guard lets the route through.
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView, placeholder: fn() -> AnyView) -> impl IntoView {
    let router = use_router();
    // Session commits that keep the same outcome must not remount the page.
    let resolution = Memo::new(move |_| router.resolution());

    move || match resolution.get() {
        Resolution::Show(route) => matcher(route),
        Resolution::Loading(_) | Resolution::Redirect(_) => placeholder(),
    }
}

/// In-app link; plain clicks navigate without a reload.
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(to);
    };

    view! {
        <a href={to.to_path()} class=class on:click=on_click>
            {children()}
        </a>
    }
}
