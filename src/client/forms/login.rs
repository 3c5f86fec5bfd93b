//! Login / registration form

use super::{trimmed, Route, SubmitState};
use crate::api::responses::{LoginResponse, RegisterResponse};
use crate::client::error::{ClientError, ClientResult};
use crate::client::session::{RequestContext, Session};
use crate::client::ApiClient;
use crate::config::secret_string;
use crate::domain::validation::{validate_login, validate_new_user};
use crate::domain::{LoginRequest, RegisterUser};

const REGISTERED_PROMPT: &str = "Registration successful! Please log in.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Payload for the endpoint matching the current mode
#[derive(Debug, Clone)]
pub enum AuthRequest {
    Login(LoginRequest),
    Register(RegisterUser),
}

#[derive(Debug, Clone)]
pub enum AuthResponse {
    LoggedIn(LoginResponse),
    Registered(RegisterResponse),
}

#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// Credentials accepted; continue to the patient list
    SignedIn(Session),
    /// Account created; the form is back in login mode
    Registered { prompt: String },
}

impl LoginOutcome {
    pub fn route(&self) -> Route {
        match self {
            LoginOutcome::SignedIn(_) => Route::PatientList,
            LoginOutcome::Registered { .. } => Route::Login,
        }
    }
}

/// One form, two modes
#[derive(Debug, Default)]
pub struct LoginForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
    pub department: String,
    /// Empty means the default role
    pub role: String,
    error: Option<String>,
    notice: Option<String>,
    submit: SubmitState,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.error = None;
        self.notice = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Confirmation shown after registering
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.is_submitting()
    }

    fn request(&self) -> AuthRequest {
        let password = trimmed(&self.password).map(|_| secret_string(self.password.clone()));
        match self.mode {
            AuthMode::Login => AuthRequest::Login(LoginRequest {
                email: trimmed(&self.email),
                password,
            }),
            AuthMode::Register => AuthRequest::Register(RegisterUser {
                name: trimmed(&self.name),
                email: trimmed(&self.email),
                password,
                role: trimmed(&self.role),
                department: trimmed(&self.department),
            }),
        }
    }

    /// Validates and marks the form as submitting
    pub fn begin_submit(&mut self) -> ClientResult<AuthRequest> {
        if self.submit.is_submitting() {
            return Err(ClientError::AlreadySubmitting);
        }

        let request = self.request();
        let checked = match &request {
            AuthRequest::Login(login) => validate_login(login).map(|_| ()),
            AuthRequest::Register(user) => validate_new_user(user).map(|_| ()),
        };
        if let Err(errors) = checked {
            self.error = Some(errors.to_string());
            return Err(errors.into());
        }

        self.submit.begin()?;
        self.error = None;
        self.notice = None;
        Ok(request)
    }

    /// Applies the server's answer
    pub fn finish_submit(
        &mut self,
        result: ClientResult<AuthResponse>,
    ) -> ClientResult<LoginOutcome> {
        self.submit.finish();
        match result {
            Ok(AuthResponse::LoggedIn(response)) => {
                self.password.clear();
                Ok(LoginOutcome::SignedIn(Session::signed_in(
                    response.token,
                    response.user,
                )))
            }
            Ok(AuthResponse::Registered(_)) => {
                self.mode = AuthMode::Login;
                self.password.clear();
                self.notice = Some(REGISTERED_PROMPT.to_string());
                Ok(LoginOutcome::Registered {
                    prompt: REGISTERED_PROMPT.to_string(),
                })
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Posts to `/api/auth/login` or `/api/auth/register` depending on the mode
    pub async fn submit(
        &mut self,
        api: &ApiClient,
        ctx: &RequestContext,
    ) -> ClientResult<LoginOutcome> {
        let request = self.begin_submit()?;
        let result = match &request {
            AuthRequest::Login(login) => api.login(ctx, login).await.map(AuthResponse::LoggedIn),
            AuthRequest::Register(user) => {
                api.register(ctx, user).await.map(AuthResponse::Registered)
            }
        };
        self.finish_submit(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_mode_requires_only_credentials() {
        let mut form = LoginForm::new();
        form.email = "nurse@ward.example".to_string();
        form.password = "hunter22".to_string();
        assert!(matches!(form.begin_submit(), Ok(AuthRequest::Login(_))));
        assert!(form.is_submitting());
        assert!(matches!(form.begin_submit(), Err(ClientError::AlreadySubmitting)));
    }

    #[test]
    fn test_register_mode_requires_profile_fields() {
        let mut form = LoginForm::new();
        form.toggle_mode();
        form.email = "nurse@ward.example".to_string();
        form.password = "hunter22".to_string();

        let err = form.begin_submit().unwrap_err();
        let ClientError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.has_field("name"));
        assert!(errors.has_field("department"));
        assert!(!form.is_submitting());
        assert!(form.error().is_some());
    }

    #[test]
    fn test_registration_switches_back_to_login() {
        let mut form = LoginForm::new();
        form.toggle_mode();
        form.submit.begin().unwrap();

        let registered: RegisterResponse = serde_json::from_value(serde_json::json!({
            "message": "ok",
            "user": {
                "id": "6f1c1a4e-8a7b-4c55-9d43-1d2f0e5b7a10",
                "name": "Dana Reyes",
                "email": "dana@ward.example",
                "role": "nurse",
                "department": "ICU",
                "createdAt": "2025-01-01T00:00:00Z",
                "updatedAt": "2025-01-01T00:00:00Z"
            }
        }))
        .unwrap();

        let outcome = form
            .finish_submit(Ok(AuthResponse::Registered(registered)))
            .unwrap();
        assert_eq!(outcome.route(), Route::Login);
        assert_eq!(form.mode, AuthMode::Login);
        assert_eq!(form.notice(), Some(REGISTERED_PROMPT));
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_network_failure_keeps_fields() {
        let mut form = LoginForm::new();
        form.email = "nurse@ward.example".to_string();
        form.password = "hunter22".to_string();
        form.begin_submit().unwrap();

        let err = form
            .finish_submit(Err(ClientError::Network("refused".to_string())))
            .unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
        assert_eq!(form.error(), Some("Network error. Please try again."));
        assert_eq!(form.email, "nurse@ward.example");
    }
}
