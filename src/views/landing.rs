use super::NavCard;
use crate::route::AppRoute;
use crate::session::Session;

pub const FEATURES: [NavCard; 3] = [
    NavCard {
        route: AppRoute::Products,
        title: "Product Management",
        description: "Easily add, edit, update and delete products in stock.",
    },
    NavCard {
        route: AppRoute::StockOverview,
        title: "Stock Overview",
        description: "Review available stock, items sold, and revenue trends.",
    },
    NavCard {
        route: AppRoute::Analytics,
        title: "Analytics",
        description: "Generate reports in charts.",
    },
];

pub const SECURE_LOGIN: NavCard = NavCard {
    route: AppRoute::Login,
    title: "Secure Login",
    description: "Sign in to manage your inventory.",
};

/// Feature cards for the current session; anonymous visitors also get a login card.
pub fn cards(session: &Session) -> Vec<NavCard> {
    let mut cards = FEATURES.to_vec();
    if session.token.is_none() {
        cards.push(SECURE_LOGIN);
    }
    cards
}

/// Where choosing a feature card leads. Holding a token is enough here;
/// the route guard settles the rest.
pub fn target_for(route: AppRoute, session: &Session) -> AppRoute {
    if session.token.is_some() {
        route
    } else {
        AppRoute::auth_failure_redirect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_token() -> Session {
        Session {
            token: Some("t1".to_string()),
            user: None,
            loading: true,
        }
    }

    #[test]
    fn test_login_card_only_when_anonymous() {
        assert_eq!(cards(&Session::default()).len(), 4);
        assert_eq!(cards(&Session::default())[3], SECURE_LOGIN);
        assert_eq!(cards(&with_token()).len(), 3);
    }

    #[test]
    fn test_target_for() {
        assert_eq!(target_for(AppRoute::Analytics, &Session::default()), AppRoute::Login);
        assert_eq!(target_for(AppRoute::Analytics, &with_token()), AppRoute::Analytics);
    }
}
