use serde::{Deserialize, Serialize};

/// Error payload returned by the backend on non-2xx responses.
///
/// Some endpoints answer `{"message": ...}`, others `{"error": ...}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(alias = "error")]
    pub message: String,
}

pub mod auth {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum Role {
        Employee,
        Admin,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: String,
        pub password: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: String,
        pub name: String,
        pub role: Role,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub user: UserView,
    }
}

pub mod expense {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "UPPERCASE")]
    pub enum ExpenseStatus {
        Pending,
        Approved,
        Rejected,
    }

    /// Amount in major units, as a JSON number (`12.5`) or, for SQL decimal
    /// columns, a numeric string (`"12.50"`).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum WireAmount {
        Number(f64),
        Text(String),
    }

    /// An expense as sent by the backend.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseView {
        pub id: String,
        pub amount: WireAmount,
        pub category: String,
        pub description: String,
        /// Calendar date, either `YYYY-MM-DD` or a full ISO-8601 timestamp.
        pub date: String,
        pub status: ExpenseStatus,
        /// Author name. Some endpoints send `userName` instead, or both.
        #[serde(default)]
        pub submitted_by: Option<String>,
        #[serde(default)]
        pub user_name: Option<String>,
    }

    /// Request body for creating or updating an expense.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseBody {
        pub amount: f64,
        pub category: String,
        pub description: String,
        /// `YYYY-MM-DD`.
        pub date: String,
    }

    /// Request body for `POST /expenses/{id}/status`.
    ///
    /// Only `APPROVED` and `REJECTED` are accepted by the server.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatusUpdate {
        pub status: ExpenseStatus,
    }

    /// Response of the list endpoints.
    ///
    /// The backend answers either with a bare array or wraps it in
    /// `{"expenses": [...]}`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum ExpenseList {
        Wrapped { expenses: Vec<ExpenseView> },
        Bare(Vec<ExpenseView>),
    }

    impl ExpenseList {
        pub fn into_vec(self) -> Vec<ExpenseView> {
            match self {
                Self::Wrapped { expenses } => expenses,
                Self::Bare(expenses) => expenses,
            }
        }
    }

    /// Response of the single-record endpoints (create, update, status).
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum ExpenseResponse {
        Wrapped { expense: ExpenseView },
        Bare(ExpenseView),
    }

    impl ExpenseResponse {
        pub fn into_inner(self) -> ExpenseView {
            match self {
                Self::Wrapped { expense } => expense,
                Self::Bare(expense) => expense,
            }
        }
    }
}
