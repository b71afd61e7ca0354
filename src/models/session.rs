// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Session store holding the current citizen's authentication state.

use thiserror::Error;

/// Authenticated citizen record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// 12-digit Aadhar number used to sign in.
    pub identifier: String,
    /// Username chosen at registration; absent after a plain login.
    pub display_name: Option<String>,
    /// Always true while the session exists.
    pub authenticated: bool,
}

impl Session {
    /// Name shown in the dashboard greeting.
    pub fn greeting_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("Citizen")
    }
}

/// Misuse of the session accessor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no citizen is signed in")]
    NotAuthenticated,
}

/// Two-state store: anonymous until a login or signup, back to anonymous on logout.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: Option<Session>,
}

impl SessionStore {
    /// Authenticate with an identifier only. The credential check happens before this call.
    pub fn login(&mut self, identifier: impl Into<String>) {
        let identifier = identifier.into();
        tracing::info!(citizen = %mask_identifier(&identifier), "session: login");
        self.current = Some(Session {
            identifier,
            display_name: None,
            authenticated: true,
        });
    }

    /// Authenticate with identifier and username, replacing any existing session.
    pub fn signup(&mut self, identifier: impl Into<String>, display_name: impl Into<String>) {
        let identifier = identifier.into();
        if self.current.is_some() {
            tracing::debug!("session: signup replaces an active session");
        }
        tracing::info!(citizen = %mask_identifier(&identifier), "session: signup");
        self.current = Some(Session {
            identifier,
            display_name: Some(display_name.into()),
            authenticated: true,
        });
    }

    /// Drop the session. Calling this while anonymous is a no-op.
    pub fn logout(&mut self) {
        match self.current.take() {
            Some(session) => {
                tracing::info!(citizen = %mask_identifier(&session.identifier), "session: logout");
            }
            None => tracing::debug!("session: logout while anonymous ignored"),
        }
    }

    /// Current session, if any.
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.as_ref().is_some_and(|s| s.authenticated)
    }

    /// Session for views that may only render while signed in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when called while anonymous.
    pub fn require(&self) -> Result<&Session, SessionError> {
        self.current
            .as_ref()
            .filter(|s| s.authenticated)
            .ok_or(SessionError::NotAuthenticated)
    }
}

/// Hide all but the last four digits of an identifier for log output.
pub fn mask_identifier(identifier: &str) -> String {
    let count = identifier.chars().count();
    let keep = count.min(4);
    let mut masked = "*".repeat(count - keep);
    masked.extend(identifier.chars().skip(count - keep));
    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_anonymous() {
        let store = SessionStore::default();
        assert!(!store.is_authenticated());
        assert!(store.current().is_none());
        assert_eq!(store.require(), Err(SessionError::NotAuthenticated));
    }

    #[test]
    fn login_then_logout() {
        let mut store = SessionStore::default();
        store.login("123456789012");

        let session = store.require().expect("authenticated");
        assert_eq!(session.identifier, "123456789012");
        assert_eq!(session.display_name, None);
        assert!(session.authenticated);

        store.logout();
        assert!(!store.is_authenticated());
        assert!(store.current().is_none());
    }

    #[test]
    fn signup_sets_display_name_and_overwrites() {
        let mut store = SessionStore::default();
        store.login("111111111111");
        store.signup("222222222222", "new_user");

        let session = store.current().unwrap();
        assert_eq!(session.identifier, "222222222222");
        assert_eq!(session.display_name.as_deref(), Some("new_user"));
        assert_eq!(session.greeting_name(), "new_user");
    }

    #[test]
    fn logout_twice_is_a_no_op() {
        let mut store = SessionStore::default();
        store.login("123456789012");
        store.logout();
        assert!(!store.is_authenticated());
        store.logout();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn greeting_falls_back_to_citizen() {
        let mut store = SessionStore::default();
        store.login("123456789012");
        assert_eq!(store.require().unwrap().greeting_name(), "Citizen");
    }

    #[test]
    fn mask_keeps_last_four() {
        assert_eq!(mask_identifier("123456789012"), "********9012");
        assert_eq!(mask_identifier("12"), "12");
        assert_eq!(mask_identifier(""), "");
    }
}
