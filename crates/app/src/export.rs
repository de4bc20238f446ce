use std::io::Write;

use csv::Writer;
use engine::Expense;
use serde::Serialize;

use crate::error::Result;

#[derive(Serialize)]
struct ExportRow<'a> {
    id: &'a str,
    date: String,
    amount: String,
    amount_cents: i64,
    category: &'a str,
    description: &'a str,
    status: &'static str,
    submitted_by: &'a str,
}

/// Writes one CSV row per expense, with a header line.
pub fn write_csv<W: Write>(writer: W, expenses: &[Expense]) -> Result<()> {
    let mut writer = Writer::from_writer(writer);
    for expense in expenses {
        writer.serialize(ExportRow {
            id: expense.id.as_str(),
            date: expense.date.format("%Y-%m-%d").to_string(),
            amount: format!("{:.2}", expense.amount.to_major()),
            amount_cents: expense.amount.cents(),
            category: &expense.category,
            description: &expense.description,
            status: expense.status.code(),
            submitted_by: expense.submitted_by.as_deref().unwrap_or_default(),
        })?;
    }
    writer.flush()?;
    Ok(())
}
