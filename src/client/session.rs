//! Explicit client session
//!
//! The token and signed-in user live in a [`Session`] owned by the caller and
//! handed to every [`ApiClient`](super::ApiClient) call inside a
//! [`RequestContext`]. Nothing is read from ambient storage.

use crate::config::{secret_string, SecretString};
use crate::domain::UserProfile;
use secrecy::ExposeSecret;

/// Bearer token plus the user it belongs to
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<SecretString>,
    user: Option<UserProfile>,
}

impl Session {
    pub fn signed_in(token: String, user: UserProfile) -> Self {
        Self {
            token: Some(secret_string(token)),
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Raw bearer token
    pub fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.expose_secret().as_str())
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Logout
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// Per-call context
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub session: Session,
}

impl RequestContext {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Context with no credentials
    pub fn anonymous() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, UserId};
    use chrono::Utc;

    #[test]
    fn test_clear_logs_out() {
        let now = Utc::now();
        let user = UserProfile {
            id: UserId::new(),
            name: "Lee Park".to_string(),
            email: "lee@ward.example".to_string(),
            role: Role::Nurse,
            department: "ED".to_string(),
            created_at: now,
            updated_at: now,
        };
        let mut session = Session::signed_in("abc.def.ghi".to_string(), user);
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("abc.def.ghi"));
        assert!(!format!("{session:?}").contains("abc.def.ghi"));

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(!RequestContext::anonymous().session.is_authenticated());
    }
}
