use stockdesk_shared::User;

use super::NavCard;
use crate::route::AppRoute;

pub const CARDS: [NavCard; 3] = [
    NavCard {
        route: AppRoute::Products,
        title: "Manage Products",
        description: "Add, edit, delete and sell products.",
    },
    NavCard {
        route: AppRoute::StockOverview,
        title: "Stock Overview",
        description: "Items in stock, units sold and revenue.",
    },
    NavCard {
        route: AppRoute::Analytics,
        title: "Analytics",
        description: "Sales reports and category charts.",
    },
];

pub fn greeting(user: Option<&User>) -> String {
    match user {
        Some(user) => format!("Welcome, {}!", user.name),
        None => "Welcome!".to_string(),
    }
}
