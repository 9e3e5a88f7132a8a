//! Route guard
//!
//! Decides, from a session snapshot alone, whether a page may render.

use log::debug;
use stockdesk_shared::Role;

use crate::route::AppRoute;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    RedirectLogin,
    RedirectUnauthorized,
    ShowLoadingPlaceholder,
}

/// Rules, first match wins: loading, no session, wrong role, render.
pub fn check(session: &Session, required_role: Option<Role>) -> GuardDecision {
    if session.loading {
        return GuardDecision::ShowLoadingPlaceholder;
    }

    let user = match (&session.token, &session.user) {
        (Some(_), Some(user)) => user,
        _ => return GuardDecision::RedirectLogin,
    };

    match required_role {
        Some(role) if user.role != role => GuardDecision::RedirectUnauthorized,
        _ => GuardDecision::Render,
    }
}

/// What the router should do for a requested page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Show(AppRoute),
    /// Session still being validated; keep the URL and show a placeholder.
    Loading(AppRoute),
    Redirect(AppRoute),
}

impl Resolution {
    /// The page that ends up on screen.
    pub fn route(&self) -> AppRoute {
        match self {
            Resolution::Show(r) | Resolution::Loading(r) | Resolution::Redirect(r) => *r,
        }
    }
}

pub fn resolve(route: AppRoute, session: &Session) -> Resolution {
    if route.requires_auth() {
        return match check(session, route.required_role()) {
            GuardDecision::Render => Resolution::Show(route),
            GuardDecision::ShowLoadingPlaceholder => Resolution::Loading(route),
            GuardDecision::RedirectLogin => {
                debug!("{} requires a session", route);
                Resolution::Redirect(AppRoute::auth_failure_redirect())
            }
            GuardDecision::RedirectUnauthorized => Resolution::Redirect(AppRoute::Unauthorized),
        };
    }

    if route.should_redirect_when_authenticated() && session.is_authenticated() {
        return Resolution::Redirect(AppRoute::auth_success_redirect());
    }

    Resolution::Show(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdesk_shared::User;

    fn user(role: Role) -> User {
        User {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "a@b.com".to_string(),
            role,
        }
    }

    fn session(token: Option<&str>, user: Option<User>, loading: bool) -> Session {
        Session {
            token: token.map(str::to_string),
            user,
            loading,
        }
    }

    #[test]
    fn test_loading_never_redirects_to_login() {
        let cases = [
            session(None, None, true),
            session(Some("t"), None, true),
            session(Some("t"), Some(user(Role::User)), true),
        ];
        for s in &cases {
            for role in [None, Some(Role::Admin)] {
                assert_eq!(check(s, role), GuardDecision::ShowLoadingPlaceholder);
            }
        }
    }

    #[test]
    fn test_missing_token_redirects_to_login() {
        assert_eq!(check(&session(None, None, false), None), GuardDecision::RedirectLogin);
        assert_eq!(
            check(&session(None, None, false), Some(Role::Admin)),
            GuardDecision::RedirectLogin
        );
        // token without a validated user is not a session
        assert_eq!(
            check(&session(Some("t"), None, false), None),
            GuardDecision::RedirectLogin
        );
    }

    #[test]
    fn test_role_mismatch() {
        let s = session(Some("t"), Some(user(Role::User)), false);
        assert_eq!(check(&s, Some(Role::Admin)), GuardDecision::RedirectUnauthorized);
        assert_eq!(check(&s, Some(Role::User)), GuardDecision::Render);
        assert_eq!(check(&s, None), GuardDecision::Render);
    }

    #[test]
    fn test_resolve() {
        let anon = Session::default();
        let signed_in = session(Some("t"), Some(user(Role::User)), false);
        let restoring = session(Some("t"), None, true);

        assert_eq!(
            resolve(AppRoute::Products, &anon),
            Resolution::Redirect(AppRoute::Login)
        );
        assert_eq!(
            resolve(AppRoute::Products, &restoring),
            Resolution::Loading(AppRoute::Products)
        );
        assert_eq!(
            resolve(AppRoute::Products, &signed_in),
            Resolution::Show(AppRoute::Products)
        );
        assert_eq!(
            resolve(AppRoute::Login, &signed_in),
            Resolution::Redirect(AppRoute::Dashboard)
        );
        assert_eq!(resolve(AppRoute::Login, &restoring), Resolution::Show(AppRoute::Login));
        assert_eq!(resolve(AppRoute::Landing, &anon).route(), AppRoute::Landing);
    }
}
