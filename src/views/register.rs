use log::warn;
use std::rc::Rc;
use stockdesk_shared::{RegisterRequest, Role};

use super::Feedback;
use super::login::{check_email, validate_password};
use crate::api::ApiClient;
use crate::error::ValidationError;
use crate::notice::Notice;
use crate::request::HttpClient;
use crate::route::AppRoute;

pub const REGISTER_SUCCESS: &str = "Registration successful! Please log in.";
pub const REGISTER_FAILED: &str = "Registration failed!";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl RegisterForm {
    pub fn to_request(&self) -> Result<RegisterRequest, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required { field: "Name" });
        }
        check_email(&self.email)?;
        validate_password(&self.password)?;

        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.clone(),
            password: self.password.clone(),
            role: self.role,
        })
    }
}

pub struct RegisterController<C> {
    api: Rc<ApiClient<C>>,
}

impl<C: HttpClient> RegisterController<C> {
    pub fn new(api: Rc<ApiClient<C>>) -> Self {
        Self { api }
    }

    pub async fn submit(&self, form: &RegisterForm) -> Feedback {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => return Feedback::notice(Notice::error(e.to_string())),
        };

        match self.api.send(&request).await {
            Ok(_) => Feedback::notice(Notice::success(REGISTER_SUCCESS)).then(AppRoute::Login),
            Err(e) => {
                warn!("registration failed: {}", e);
                Feedback::notice(Notice::error(e.user_message(REGISTER_FAILED)))
            }
        }
    }
}
