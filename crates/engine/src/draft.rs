use chrono::NaiveDate;

use crate::{Amount, EngineError, ResultEngine, parse_expense_date, util::normalize_display};

/// Unsaved expense input, prior to the server assigning id, status and author.
///
/// A draft obtained through [`ExpenseDraft::parse`] or
/// [`ExpenseDraft::new`] is always valid: positive amount, non-empty
/// category and description, real calendar date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseDraft {
    amount: Amount,
    category: String,
    description: String,
    date: NaiveDate,
}

impl ExpenseDraft {
    /// Builds a draft from already typed values.
    pub fn new(
        amount: Amount,
        category: &str,
        description: &str,
        date: NaiveDate,
    ) -> ResultEngine<Self> {
        if amount.is_zero() {
            return Err(EngineError::InvalidAmount(
                "amount must be greater than 0".to_string(),
            ));
        }
        let category = normalize_display(category)
            .ok_or_else(|| EngineError::EmptyField("category".to_string()))?;
        let description = normalize_display(description)
            .ok_or_else(|| EngineError::EmptyField("description".to_string()))?;

        Ok(Self {
            amount,
            category,
            description,
            date,
        })
    }

    /// Builds a draft from raw form input.
    ///
    /// `amount` follows [`Amount`]'s parsing rules, `date` must be
    /// `YYYY-MM-DD`.
    pub fn parse(amount: &str, category: &str, description: &str, date: &str) -> ResultEngine<Self> {
        let amount = amount.parse::<Amount>()?;
        let date = parse_expense_date(date)?;
        Self::new(amount, category, description, date)
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}
