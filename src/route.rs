//! Route table
//!
//! Pure domain layer: no DOM access. Lists every page of the application
//! with its path and access rules.

use std::fmt::Display;
use stockdesk_shared::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    #[default]
    Landing,
    Login,
    Register,
    Dashboard,
    Products,
    StockOverview,
    Analytics,
    Unauthorized,
    NotFound,
}

impl AppRoute {
    /// Every routable page, in navigation order.
    pub const ALL: [AppRoute; 9] = [
        Self::Landing,
        Self::Login,
        Self::Register,
        Self::Dashboard,
        Self::Products,
        Self::StockOverview,
        Self::Analytics,
        Self::Unauthorized,
        Self::NotFound,
    ];

    /// Parses a URL path. A trailing slash is ignored.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Landing,
            "/login" => Self::Login,
            "/auth/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/products" => Self::Products,
            "/stock-overview" => Self::StockOverview,
            "/analytics" => Self::Analytics,
            "/unauthorized" => Self::Unauthorized,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Register => "/auth/register",
            Self::Dashboard => "/dashboard",
            Self::Products => "/products",
            Self::StockOverview => "/stock-overview",
            Self::Analytics => "/analytics",
            Self::Unauthorized => "/unauthorized",
            Self::NotFound => "/404",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Landing => "Home",
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Dashboard => "Dashboard",
            Self::Products => "Products",
            Self::StockOverview => "Stock Overview",
            Self::Analytics => "Analytics",
            Self::Unauthorized => "Unauthorized",
            Self::NotFound => "Not Found",
        }
    }

    /// Pages that only render for a validated session.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Products | Self::StockOverview | Self::Analytics
        )
    }

    /// Role a page is restricted to. No page is role-restricted today; any
    /// signed-in user may open every protected page.
    pub fn required_role(&self) -> Option<Role> {
        None
    }

    /// Pages a signed-in user is sent away from.
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
