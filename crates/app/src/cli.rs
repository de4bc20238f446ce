use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use engine::ExpenseStatus;

use crate::config::ConfigArgs;

#[derive(Debug, Parser)]
#[command(name = "expensa", version)]
#[command(about = "Submit, review and analyse expense claims")]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in; the password is prompted without echo.
    Login {
        #[arg(long)]
        email: String,
    },
    Logout,
    /// Shows the signed-in user.
    Whoami,
    /// Lists the expenses in your scope (your own, or everyone's for admins).
    List(ListArgs),
    /// Pending expenses awaiting review.
    Queue {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Submits a new expense.
    Add(DraftArgs),
    /// Edits a pending expense; omitted fields keep their current value.
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Deletes a pending expense.
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    Approve {
        id: String,
    },
    Reject {
        id: String,
    },
    /// Dashboard cards, category breakdown and monthly trend.
    Stats {
        /// Months in the trend (defaults to the configured value).
        #[arg(long)]
        months: Option<usize>,
    },
    /// Most recent expenses.
    Recent {
        #[arg(short, default_value_t = engine::views::DEFAULT_RECENT)]
        n: usize,
    },
    /// Writes the expenses in your scope to a CSV file.
    Export {
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Category search (case and accent insensitive).
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, value_parser = parse_status)]
    pub status: Option<ExpenseStatus>,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Debug, Args)]
pub struct DraftArgs {
    /// Amount in dollars, e.g. 12.50.
    #[arg(long)]
    pub amount: String,
    /// Travel, Food, Office, ...
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub description: String,
    /// YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    #[arg(long)]
    pub amount: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub date: Option<String>,
}

fn parse_status(raw: &str) -> Result<ExpenseStatus, String> {
    raw.parse::<ExpenseStatus>().map_err(|err| err.to_string())
}
