//! Stockdesk browser frontend
//!
//! Leptos CSR shell over the `stockdesk` core:
//! - `web`: browser API wrappers (fetch, storage, history, files, timers)
//! - `auth`: session context
//! - `components`: pages and shared widgets

mod auth;
mod components {
    pub mod analytics;
    pub mod dashboard;
    pub mod landing;
    pub mod login;
    pub mod navbar;
    pub mod products;
    pub mod register;
    pub mod stock_overview;
    pub mod toast;
}
pub(crate) mod web;

use std::rc::Rc;

use leptos::prelude::*;
use log::info;
use stockdesk::config::{ENV_BASE_URL, ENV_LOG_LEVEL, ENV_TOKEN_KEY};
use stockdesk::{AppRoute, ClientConfig};

use crate::auth::AuthContext;
use crate::components::analytics::AnalyticsPage;
use crate::components::dashboard::DashboardPage;
use crate::components::landing::LandingPage;
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::products::ProductsPage;
use crate::components::register::RegisterPage;
use crate::components::stock_overview::StockOverviewPage;
use crate::components::toast::{ToastHost, provide_toaster};
use crate::web::router::{Link, Router, RouterOutlet};
use crate::web::{BrowserCredentialStore, FetchHttpClient};

/// Configuration baked in at build time (`STOCKDESK_API_URL=... trunk build`).
pub fn config() -> ClientConfig {
    ClientConfig::from_lookup(|name| {
        match name {
            ENV_BASE_URL => option_env!("STOCKDESK_API_URL"),
            ENV_TOKEN_KEY => option_env!("STOCKDESK_TOKEN_KEY"),
            ENV_LOG_LEVEL => option_env!("STOCKDESK_LOG_LEVEL"),
            _ => None,
        }
        .map(str::to_string)
    })
}

fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Landing => view! { <LandingPage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Products => view! { <ProductsPage /> }.into_any(),
        AppRoute::StockOverview => view! { <StockOverviewPage /> }.into_any(),
        AppRoute::Analytics => view! { <AnalyticsPage /> }.into_any(),
        AppRoute::Unauthorized => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-warning">"403"</h1>
                    <p class="text-xl mt-4">"You do not have access to this page."</p>
                    <Link to=AppRoute::Dashboard class="btn btn-primary mt-6">"Back to Dashboard"</Link>
                </div>
            </div>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to=AppRoute::Landing class="btn btn-primary mt-6">"Go Home"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

fn loading_placeholder() -> AnyView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <span class="loading loading-spinner loading-lg"></span>
        </div>
    }
    .into_any()
}

#[component]
pub fn App() -> impl IntoView {
    let config = config();
    info!("api root: {}", config.base_url);

    let manager = stockdesk::connect(
        &config,
        FetchHttpClient::new(),
        BrowserCredentialStore::new(config.token_key.clone()),
    );
    let status = manager.start();
    info!("session start: {:?}", status);

    let auth = AuthContext::new(Rc::clone(&manager));
    provide_context(auth);
    auth.restore();

    provide_toaster();

    view! {
        <Router session={auth.session()}>
            <Navbar />
            <RouterOutlet matcher=route_matcher placeholder=loading_placeholder />
            <ToastHost />
        </Router>
    }
}
