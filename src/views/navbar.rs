use std::cell::Cell;

use super::Feedback;
use crate::credential::CredentialStore;
use crate::request::HttpClient;
use crate::route::AppRoute;
use crate::session::SessionManager;

/// Profile dropdown shown in the navbar and on the landing page.
#[derive(Debug, Default)]
pub struct ProfileMenu {
    open: Cell<bool>,
}

impl ProfileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Flips the menu; returns the new state.
    pub fn toggle(&self) -> bool {
        let open = !self.open.get();
        self.open.set(open);
        open
    }

    pub fn close(&self) {
        self.open.set(false);
    }

    /// Ends the session, closes the menu and heads home.
    pub fn logout<C: HttpClient, S: CredentialStore>(
        &self,
        session: &SessionManager<C, S>,
    ) -> Feedback {
        session.logout();
        self.close();
        Feedback::navigate(AppRoute::Landing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::credential::MemoryCredentialStore;
    use crate::request::MockHttpClient;
    use crate::session::SessionStatus;
    use std::rc::Rc;

    #[test]
    fn test_toggle() {
        let menu = ProfileMenu::new();
        assert!(menu.toggle());
        assert!(menu.is_open());
        assert!(!menu.toggle());
        assert!(!menu.is_open());
    }

    #[test]
    fn test_logout_closes_and_goes_home() {
        let store = MemoryCredentialStore::with_token("t1");
        let api = Rc::new(ApiClient::new("http://api.test", MockHttpClient::new()));
        let session = SessionManager::new(api, store.clone());
        session.start();

        let menu = ProfileMenu::new();
        menu.toggle();
        let feedback = menu.logout(&session);

        assert!(!menu.is_open());
        assert_eq!(feedback.navigate, Some(AppRoute::Landing));
        assert_eq!(session.status(), SessionStatus::Anonymous);
        assert_eq!(store.get(), None);
    }
}
