//! Page controllers
//!
//! Each controller owns the state one page needs and speaks only in
//! [`Notice`]s and routes; rendering happens elsewhere.

use rust_decimal::Decimal;

use crate::notice::Notice;
use crate::route::AppRoute;

pub mod analytics;
pub mod dashboard;
pub mod landing;
pub mod login;
pub mod navbar;
pub mod products;
pub mod register;
pub mod stock_overview;

/// What the page should do after a user action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Feedback {
    pub notice: Option<Notice>,
    pub navigate: Option<AppRoute>,
}

impl Feedback {
    pub fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            navigate: None,
        }
    }

    pub fn navigate(route: AppRoute) -> Self {
        Self {
            notice: None,
            navigate: Some(route),
        }
    }

    pub fn then(mut self, route: AppRoute) -> Self {
        self.navigate = Some(route);
        self
    }
}

/// A card linking to another page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavCard {
    pub route: AppRoute,
    pub title: &'static str,
    pub description: &'static str,
}

/// `$1234.50`
pub fn format_money(value: Decimal) -> String {
    format!("${:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::new(12345, 1)), "$1234.50");
        assert_eq!(format_money(Decimal::ZERO), "$0.00");
    }
}
