use std::path::PathBuf;

use engine::{Expense, ExpenseDraft, ExpenseId, ReviewDecision, Role, User};
use tokio::sync::RwLock;

use crate::{
    auth::AuthState,
    error::{AuthError, ClientError, ExpenseError, StateError},
    http::Client,
    local_state::{LocalState, PersistedSession},
    mapping::{api_status, expense_body, map_expense, map_expenses, map_user},
    store::ExpenseStore,
};

/// Proof that the user confirmed a destructive action.
///
/// [`Session::remove`] cannot be called without one.
#[derive(Debug, Clone, Copy)]
pub struct Confirmation(());

impl Confirmation {
    pub fn confirmed() -> Self {
        Self(())
    }
}

/// Signed-in session: HTTP client, auth state and expense cache with a
/// shared lifetime.
///
/// Mutations check role and status against the cache before any request;
/// the backend stays authoritative for records not cached. A successful
/// mutation merges the returned record into the store, a failed one leaves
/// the store untouched.
#[derive(Debug)]
pub struct Session {
    client: Client,
    auth: RwLock<AuthState>,
    store: ExpenseStore,
    state_path: Option<PathBuf>,
}

impl Session {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            auth: RwLock::new(AuthState::new()),
            store: ExpenseStore::new(),
            state_path: None,
        }
    }

    /// Persists the session identity to `path` on login.
    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = Some(path.into());
        self
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    pub async fn auth(&self) -> AuthState {
        self.auth.read().await.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.auth.read().await.user().cloned()
    }

    /// Resumes the session saved by a previous login, if any.
    pub async fn restore(&self) -> Result<Option<User>, StateError> {
        let Some(path) = &self.state_path else {
            return Ok(None);
        };
        let Some(saved) = LocalState::load(path)?.root else {
            return Ok(None);
        };

        if let Some(cookies) = &saved.cookies {
            self.client.restore_cookies(cookies);
        }
        tracing::debug!(user = %saved.user.name, "session restored");
        self.auth.write().await.succeed(saved.user.clone());
        Ok(Some(saved.user))
    }

    /// Signs in, replacing any previous session.
    ///
    /// The previous session is ended before the attempt, so a failed
    /// re-login leaves nothing to restore.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.end_session().await;

        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            let err = AuthError::InvalidCredentials("email and password are required".to_string());
            self.auth.write().await.fail(err.to_string());
            return Err(err);
        }

        self.auth.write().await.begin_login();

        match self.client.login(email, password).await {
            Ok(view) => {
                let user = map_user(view);
                tracing::info!(user = %user.name, role = user.role.as_str(), "logged in");
                self.auth.write().await.succeed(user.clone());
                self.persist(&user);
                Ok(user)
            }
            Err(err) => {
                let err = login_failure(err);
                tracing::info!("login failed: {err}");
                self.auth.write().await.fail(err.to_string());
                Err(err)
            }
        }
    }

    /// Ends the session and drops everything scoped to it.
    pub async fn logout(&self) {
        self.auth.write().await.logout();
        self.end_session().await;
        tracing::info!("logged out");
    }

    /// Dismisses a failed login.
    pub async fn acknowledge_login_error(&self) {
        self.auth.write().await.acknowledge();
    }

    /// Fetches the role's scope and replaces the store's content with it.
    ///
    /// Returns the fetched set. The store only takes it if nothing newer was
    /// written while the request was in flight; on failure the store keeps
    /// its previous content.
    pub async fn load(&self) -> Result<Vec<Expense>, ExpenseError> {
        let user = self.current_user().await?;
        let scope = user.role.scope();
        let ticket = self.store.begin_load(scope).await;
        tracing::debug!(?scope, "loading expenses");

        let result: Result<Vec<Expense>, ExpenseError> = async {
            let views = self.client.list_expenses(scope).await?;
            Ok(map_expenses(views)?)
        }
        .await;
        let items = self.check_expired(result).await?;

        self.store.apply_load(ticket, items.clone()).await;
        Ok(items)
    }

    pub async fn create(&self, draft: &ExpenseDraft) -> Result<Expense, ExpenseError> {
        let user = self.current_user().await?;
        user.check_create()?;

        let body = expense_body(draft);
        let result: Result<Expense, ExpenseError> = async {
            let view = self.client.create_expense(&body).await?;
            Ok(map_expense(view)?)
        }
        .await;
        let expense = self.check_expired(result).await?;

        tracing::info!(id = %expense.id, "expense created");
        self.store.upsert(expense.clone()).await;
        Ok(expense)
    }

    pub async fn update(&self, id: &ExpenseId, draft: &ExpenseDraft) -> Result<Expense, ExpenseError> {
        let user = self.current_user().await?;
        match self.store.get(id).await {
            Some(cached) => user.check_edit(&cached)?,
            None => user.require_role(Role::Employee, "edit expenses")?,
        }

        let body = expense_body(draft);
        let result: Result<Expense, ExpenseError> = async {
            let view = self.client.update_expense(id.as_str(), &body).await?;
            Ok(map_expense(view)?)
        }
        .await;
        let expense = self.check_expired(result).await?;

        tracing::info!(id = %expense.id, "expense updated");
        self.store.upsert(expense.clone()).await;
        Ok(expense)
    }

    pub async fn remove(&self, id: &ExpenseId, _confirmation: Confirmation) -> Result<(), ExpenseError> {
        let user = self.current_user().await?;
        match self.store.get(id).await {
            Some(cached) => user.check_delete(&cached)?,
            None => user.require_role(Role::Employee, "delete expenses")?,
        }

        let result = self
            .client
            .delete_expense(id.as_str())
            .await
            .map_err(ExpenseError::from);
        self.check_expired(result).await?;

        tracing::info!(%id, "expense deleted");
        self.store.evict(id).await;
        Ok(())
    }

    /// Approves or rejects a pending expense (admins only).
    pub async fn set_status(&self, id: &ExpenseId, decision: ReviewDecision) -> Result<Expense, ExpenseError> {
        let user = self.current_user().await?;
        match self.store.get(id).await {
            Some(cached) => {
                user.check_review(&cached)?;
                cached.status.transition(decision.target())?;
            }
            None => user.require_role(Role::Admin, "approve or reject expenses")?,
        }

        let result: Result<Expense, ExpenseError> = async {
            let view = self
                .client
                .set_status(id.as_str(), api_status(decision.target()))
                .await?;
            Ok(map_expense(view)?)
        }
        .await;
        let expense = self.check_expired(result).await?;

        tracing::info!(id = %expense.id, status = expense.status.code(), "expense reviewed");
        self.store.upsert(expense.clone()).await;
        Ok(expense)
    }

    async fn current_user(&self) -> Result<User, AuthError> {
        self.auth
            .read()
            .await
            .user()
            .cloned()
            .ok_or(AuthError::NotAuthenticated)
    }

    /// Ends the session when the backend reported it as expired.
    async fn check_expired<T>(&self, result: Result<T, ExpenseError>) -> Result<T, ExpenseError> {
        if let Err(err) = &result
            && err.is_session_expired()
        {
            tracing::warn!("session expired");
            self.auth.write().await.logout();
            self.end_session().await;
        }
        result
    }

    async fn end_session(&self) {
        self.store.clear().await;
        self.client.clear_cookies();
        if let Some(path) = &self.state_path
            && let Err(err) = LocalState::remove(path)
        {
            tracing::warn!("failed to remove session file: {err}");
        }
    }

    fn persist(&self, user: &User) {
        let Some(path) = &self.state_path else {
            return;
        };
        let state = LocalState {
            root: Some(PersistedSession {
                user: user.clone(),
                cookies: self.client.session_cookies(),
            }),
        };
        if let Err(err) = state.save(path) {
            tracing::warn!("failed to persist session: {err}");
        }
    }
}

fn login_failure(err: ClientError) -> AuthError {
    match err {
        ClientError::Unauthorized(message)
        | ClientError::Forbidden(message)
        | ClientError::NotFound(message)
        | ClientError::Conflict(message)
        | ClientError::Validation(message) => {
            if message.trim().is_empty() {
                AuthError::InvalidCredentials("Login failed".to_string())
            } else {
                AuthError::InvalidCredentials(message)
            }
        }
        other => AuthError::Unreachable(other.to_string()),
    }
}
