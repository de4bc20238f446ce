//! Client side of the expense dashboard.
//!
//! - [`Client`]: HTTP adapter for the backend REST API.
//! - [`AuthState`]: login lifecycle.
//! - [`ExpenseStore`]: cache of the expenses visible to the session.
//! - [`Session`]: ties the three together and enforces the mutation rules.
//!
//! Derived views (filters, pages, charts) live in [`engine::views`].

pub use auth::{AuthState, AuthStatus};
pub use error::{AuthError, ClientError, ExpenseError, FetchError, StateError};
pub use http::Client;
pub use local_state::{LocalState, PersistedSession, default_state_path};
pub use session::{Confirmation, Session};
pub use store::{ExpenseStore, LoadTicket};

mod auth;
mod error;
mod http;
mod local_state;
mod mapping;
mod session;
mod store;
