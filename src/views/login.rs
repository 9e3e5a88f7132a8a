use log::warn;
use std::rc::Rc;

use super::Feedback;
use crate::credential::CredentialStore;
use crate::error::ValidationError;
use crate::notice::Notice;
use crate::request::HttpClient;
use crate::route::AppRoute;
use crate::session::SessionManager;

pub const MIN_PASSWORD_LEN: usize = 6;

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const LOGIN_REJECTED: &str = "Invalid email or password!";

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Password rules shared with registration.
pub(crate) fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        return Err(ValidationError::Required { field: "Password" });
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

pub(crate) fn check_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::Required { field: "Email" });
    }
    if !validate_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_email(&self.email)?;
        validate_password(&self.password)
    }
}

pub struct LoginController<C, S> {
    session: Rc<SessionManager<C, S>>,
}

impl<C: HttpClient, S: CredentialStore> LoginController<C, S> {
    pub fn new(session: Rc<SessionManager<C, S>>) -> Self {
        Self { session }
    }

    pub async fn submit(&self, form: &LoginForm) -> Feedback {
        if let Err(e) = form.validate() {
            return Feedback::notice(Notice::error(e.to_string()));
        }

        match self.session.login(&form.email, &form.password).await {
            Ok(_) => Feedback::notice(Notice::success(LOGIN_SUCCESS))
                .then(AppRoute::auth_success_redirect()),
            Err(e) => {
                warn!("login rejected: {}", e);
                Feedback::notice(Notice::error(LOGIN_REJECTED))
            }
        }
    }
}
