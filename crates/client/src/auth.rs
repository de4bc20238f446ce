use engine::User;

/// Login lifecycle of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    Anonymous,
    LoggingIn,
    Authenticated(User),
    /// Carries the message to show; no automatic retry.
    LoginFailed(String),
}

/// Process-wide session identity.
///
/// Transitions: `Anonymous -> LoggingIn -> Authenticated`, or
/// `LoggingIn -> LoginFailed -> Anonymous` once the failure is acknowledged.
/// `logout` returns to `Anonymous` from any state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    status: AuthStatus,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &AuthStatus {
        &self.status
    }

    pub fn user(&self) -> Option<&User> {
        match &self.status {
            AuthStatus::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.status, AuthStatus::Authenticated(_))
    }

    pub fn is_logging_in(&self) -> bool {
        matches!(self.status, AuthStatus::LoggingIn)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            AuthStatus::LoginFailed(message) => Some(message),
            _ => None,
        }
    }

    /// Marks a login request as in flight. Any previous identity is dropped.
    pub fn begin_login(&mut self) {
        self.status = AuthStatus::LoggingIn;
    }

    pub fn succeed(&mut self, user: User) {
        self.status = AuthStatus::Authenticated(user);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = AuthStatus::LoginFailed(message.into());
    }

    /// Dismisses a login failure.
    pub fn acknowledge(&mut self) {
        if matches!(self.status, AuthStatus::LoginFailed(_)) {
            self.status = AuthStatus::Anonymous;
        }
    }

    pub fn logout(&mut self) {
        self.status = AuthStatus::Anonymous;
    }
}
