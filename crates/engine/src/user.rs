//! Session identity and role-based capability checks.

use serde::{Deserialize, Serialize};

use crate::{EngineError, Expense, ResultEngine};

/// Role of the signed-in user.
///
/// - `Employee`: submits expenses and manages their own `PENDING` claims.
/// - `Admin`: sees every claim and may only approve or reject them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Employee,
    Admin,
}

impl Role {
    /// The set of expenses visible to this role.
    #[must_use]
    pub const fn scope(self) -> Scope {
        match self {
            Self::Employee => Scope::Mine,
            Self::Admin => Scope::All,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "EMPLOYEE",
            Self::Admin => "ADMIN",
        }
    }
}

/// Visible subset of expenses for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Mine,
    All,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether `expense` belongs to this user.
    ///
    /// Records without an author are considered owned: an employee only
    /// ever loads their own scope.
    #[must_use]
    pub fn owns(&self, expense: &Expense) -> bool {
        match expense.submitted_by.as_deref() {
            None => true,
            Some(author) => author == self.id || author == self.name,
        }
    }

    #[must_use]
    pub fn can_create(&self) -> bool {
        self.check_create().is_ok()
    }

    #[must_use]
    pub fn can_edit(&self, expense: &Expense) -> bool {
        self.check_edit(expense).is_ok()
    }

    #[must_use]
    pub fn can_delete(&self, expense: &Expense) -> bool {
        self.check_delete(expense).is_ok()
    }

    #[must_use]
    pub fn can_review(&self, expense: &Expense) -> bool {
        self.check_review(expense).is_ok()
    }

    /// Fails with `Forbidden` unless the user has `role`.
    pub fn require_role(&self, role: Role, action: &str) -> ResultEngine<()> {
        if self.role != role {
            let who = match role {
                Role::Employee => "employees",
                Role::Admin => "admins",
            };
            return Err(EngineError::Forbidden(format!("only {who} can {action}")));
        }
        Ok(())
    }

    pub fn check_create(&self) -> ResultEngine<()> {
        self.require_role(Role::Employee, "submit expenses")
    }

    pub fn check_edit(&self, expense: &Expense) -> ResultEngine<()> {
        self.check_owner_mutation(expense, "edit")
    }

    pub fn check_delete(&self, expense: &Expense) -> ResultEngine<()> {
        self.check_owner_mutation(expense, "delete")
    }

    pub fn check_review(&self, expense: &Expense) -> ResultEngine<()> {
        self.require_role(Role::Admin, "approve or reject expenses")?;
        if expense.status.is_terminal() {
            return Err(EngineError::Conflict(format!(
                "expense {} is already {}",
                expense.id,
                expense.status.code()
            )));
        }
        Ok(())
    }

    fn check_owner_mutation(&self, expense: &Expense, action: &str) -> ResultEngine<()> {
        self.require_role(Role::Employee, &format!("{action} expenses"))?;
        if !self.owns(expense) {
            return Err(EngineError::Forbidden(format!(
                "expense {} belongs to another user",
                expense.id
            )));
        }
        if expense.status.is_terminal() {
            return Err(EngineError::Conflict(format!(
                "cannot {action} expense {}: status is {}",
                expense.id,
                expense.status.code()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{Amount, ExpenseId, ExpenseStatus};

    fn user(role: Role) -> User {
        User {
            id: "u1".to_string(),
            name: "Alice".to_string(),
            role,
        }
    }

    fn expense(status: ExpenseStatus, submitted_by: Option<&str>) -> Expense {
        Expense {
            id: ExpenseId::new("e1"),
            amount: Amount::from_cents(1000),
            category: "Food".to_string(),
            description: "Lunch".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            status,
            submitted_by: submitted_by.map(ToString::to_string),
        }
    }

    #[test]
    fn role_determines_scope() {
        assert_eq!(Role::Employee.scope(), Scope::Mine);
        assert_eq!(Role::Admin.scope(), Scope::All);
    }

    #[test]
    fn employee_edits_only_own_pending_expenses() {
        let alice = user(Role::Employee);

        assert!(alice.can_edit(&expense(ExpenseStatus::Pending, None)));
        assert!(alice.can_edit(&expense(ExpenseStatus::Pending, Some("u1"))));
        assert!(alice.can_delete(&expense(ExpenseStatus::Pending, Some("Alice"))));

        assert!(matches!(
            alice.check_edit(&expense(ExpenseStatus::Approved, None)),
            Err(EngineError::Conflict(_))
        ));
        assert!(matches!(
            alice.check_delete(&expense(ExpenseStatus::Rejected, None)),
            Err(EngineError::Conflict(_))
        ));
        assert!(matches!(
            alice.check_edit(&expense(ExpenseStatus::Pending, Some("bob"))),
            Err(EngineError::Forbidden(_))
        ));
    }

    #[test]
    fn admin_only_reviews_pending_expenses() {
        let admin = user(Role::Admin);

        assert!(admin.can_review(&expense(ExpenseStatus::Pending, Some("bob"))));
        assert!(!admin.can_edit(&expense(ExpenseStatus::Pending, Some("bob"))));
        assert!(!admin.can_create());
        assert!(matches!(
            admin.check_review(&expense(ExpenseStatus::Approved, Some("bob"))),
            Err(EngineError::Conflict(_))
        ));
        assert!(matches!(
            user(Role::Employee).check_review(&expense(ExpenseStatus::Pending, None)),
            Err(EngineError::Forbidden(_))
        ));
    }
}
