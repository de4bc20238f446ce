use std::fs::File;

use client::{Client, Confirmation, Session};
use engine::{
    Expense, ExpenseDraft, ExpenseId, ReviewDecision, User,
    views::{self, Pager},
};

use crate::{
    cli::{Command, DraftArgs, EditArgs, ListArgs},
    config::AppConfig,
    error::{AppError, Result},
    export, prompt, render,
};

pub async fn run(command: Command, config: &AppConfig) -> Result<()> {
    let client = Client::new(&config.base_url)?;
    tracing::debug!(base_url = %client.base_url(), "backend");
    let session = Session::new(client).with_state_path(&config.session_path);

    match command {
        Command::Login { email } => {
            let password = prompt::password("Password: ")?;
            let user = session.login(&email, &password).await?;
            println!("Signed in as {}", render::user_line(&user));
        }
        Command::Logout => {
            session.restore().await?;
            session.logout().await;
            println!("Signed out.");
        }
        Command::Whoami => match session.restore().await? {
            Some(user) => println!("{}", render::user_line(&user)),
            None => println!("Not signed in."),
        },
        Command::List(args) => list(&session, config, args).await?,
        Command::Queue { page } => queue(&session, config, page).await?,
        Command::Add(args) => add(&session, config, args).await?,
        Command::Edit { id, fields } => edit(&session, ExpenseId::new(id), fields).await?,
        Command::Delete { id, yes } => delete(&session, ExpenseId::new(id), yes).await?,
        Command::Approve { id } => review(&session, ExpenseId::new(id), ReviewDecision::Approve).await?,
        Command::Reject { id } => review(&session, ExpenseId::new(id), ReviewDecision::Reject).await?,
        Command::Stats { months } => {
            stats(&session, config, months.unwrap_or(config.months_back)).await?
        }
        Command::Recent { n } => {
            let (user, items) = load(&session).await?;
            print!("{}", render::expense_list(&views::recent(&items, n), user.is_admin()));
        }
        Command::Export { output } => {
            let (_, items) = load(&session).await?;
            let file = File::create(&output)?;
            export::write_csv(file, &items)?;
            println!("Exported {} expenses to {}", items.len(), output.display());
        }
    }

    Ok(())
}

async fn signed_in(session: &Session) -> Result<User> {
    session.restore().await?.ok_or_else(|| {
        AppError::Usage("not signed in, run `expensa login --email <email>` first".to_string())
    })
}

/// Resumes the saved session and fetches the role's scope.
async fn load(session: &Session) -> Result<(User, Vec<Expense>)> {
    let user = signed_in(session).await?;
    let items = session.load().await?;
    tracing::debug!(count = items.len(), "expenses loaded");
    Ok((user, items))
}

async fn list(session: &Session, config: &AppConfig, args: ListArgs) -> Result<()> {
    let (user, items) = load(session).await?;

    let mut filtered = views::filter_by_category(&items, args.search.as_deref().unwrap_or_default());
    if let Some(status) = args.status {
        filtered = views::filter_by_status(&filtered, status);
    }

    let mut pager = Pager::new(config.page_size);
    pager.go_to(args.page, filtered.len());
    if pager.page() != args.page.max(1) {
        tracing::info!(requested = args.page, "page out of range, showing page 1");
    }
    print!("{}", render::expense_page(&pager.slice(&filtered), user.is_admin()));
    Ok(())
}

async fn queue(session: &Session, config: &AppConfig, page: usize) -> Result<()> {
    let (user, items) = load(session).await?;
    if !user.is_admin() {
        return Err(AppError::Usage("the review queue is for admins".to_string()));
    }

    let pending = views::pending_queue(&items);
    let mut pager = Pager::new(config.page_size);
    pager.go_to(page, pending.len());
    print!("{}", render::expense_page(&pager.slice(&pending), true));
    Ok(())
}

async fn add(session: &Session, config: &AppConfig, args: DraftArgs) -> Result<()> {
    let date = match args.date {
        Some(date) => date,
        None => config.today()?.format("%Y-%m-%d").to_string(),
    };
    let draft = ExpenseDraft::parse(&args.amount, &args.category, &args.description, &date)?;

    signed_in(session).await?;
    let expense = session.create(&draft).await?;
    println!("Submitted {} ({}, {})", expense.id, expense.amount, expense.status.label());
    Ok(())
}

/// Fills the fields the user left out from the current record.
fn merge_draft(current: Option<&Expense>, fields: EditArgs, id: &ExpenseId) -> Result<ExpenseDraft> {
    let missing = || AppError::Usage(format!("expense {id} not found; pass every field to edit it"));

    let amount = match (fields.amount, current) {
        (Some(amount), _) => amount,
        (None, Some(current)) => format!("{:.2}", current.amount.to_major()),
        (None, None) => return Err(missing()),
    };
    let category = match (fields.category, current) {
        (Some(category), _) => category,
        (None, Some(current)) => current.category.clone(),
        (None, None) => return Err(missing()),
    };
    let description = match (fields.description, current) {
        (Some(description), _) => description,
        (None, Some(current)) => current.description.clone(),
        (None, None) => return Err(missing()),
    };
    let date = match (fields.date, current) {
        (Some(date), _) => date,
        (None, Some(current)) => current.date.format("%Y-%m-%d").to_string(),
        (None, None) => return Err(missing()),
    };

    Ok(ExpenseDraft::parse(&amount, &category, &description, &date)?)
}

async fn edit(session: &Session, id: ExpenseId, fields: EditArgs) -> Result<()> {
    load(session).await?;
    let current = session.store().get(&id).await;
    let draft = merge_draft(current.as_ref(), fields, &id)?;

    let expense = session.update(&id, &draft).await?;
    println!("Updated {} ({}, {})", expense.id, expense.amount, expense.category);
    Ok(())
}

async fn delete(session: &Session, id: ExpenseId, yes: bool) -> Result<()> {
    load(session).await?;
    if !yes && !prompt::confirm(&format!("Delete expense {id}?"))? {
        println!("Cancelled.");
        return Ok(());
    }

    session.remove(&id, Confirmation::confirmed()).await?;
    println!("Deleted {id}");
    Ok(())
}

async fn review(session: &Session, id: ExpenseId, decision: ReviewDecision) -> Result<()> {
    load(session).await?;
    let expense = session.set_status(&id, decision).await?;
    println!("{} is now {}", expense.id, expense.status.label());
    Ok(())
}

async fn stats(session: &Session, config: &AppConfig, months: usize) -> Result<()> {
    let (user, items) = load(session).await?;

    print!("{}", render::summary(&views::summary(&items)));
    println!();
    print!("{}", render::categories(&views::category_breakdown(&items)));
    println!();
    print!("{}", render::trend(&views::monthly_trend(&items, months, config.today()?)));
    if user.is_admin() {
        println!();
        print!("{}", render::months(&views::monthly_totals(&items)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{Amount, ExpenseStatus};

    use super::*;

    fn fields(amount: Option<&str>, category: Option<&str>) -> EditArgs {
        EditArgs {
            amount: amount.map(str::to_string),
            category: category.map(str::to_string),
            description: None,
            date: None,
        }
    }

    #[test]
    fn edit_keeps_omitted_fields() {
        let current = Expense {
            id: ExpenseId::new("e1"),
            amount: Amount::from_cents(1999),
            category: "Travel".to_string(),
            description: "Taxi".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            status: ExpenseStatus::Pending,
            submitted_by: None,
        };

        let draft = merge_draft(Some(&current), fields(None, Some("Food")), &current.id).unwrap();

        assert_eq!(draft.amount(), Amount::from_cents(1999));
        assert_eq!(draft.category(), "Food");
        assert_eq!(draft.description(), "Taxi");
        assert_eq!(draft.date(), current.date);
    }

    #[test]
    fn edit_of_unknown_record_needs_every_field() {
        let id = ExpenseId::new("ghost");
        let err = merge_draft(None, fields(Some("1"), None), &id).unwrap_err();
        assert!(matches!(err, AppError::Usage(_)));
    }

    #[test]
    fn invalid_edit_is_rejected_locally() {
        let id = ExpenseId::new("e1");
        let args = EditArgs {
            amount: Some("0".to_string()),
            category: Some("Food".to_string()),
            description: Some("Lunch".to_string()),
            date: Some("2024-01-01".to_string()),
        };
        assert!(matches!(merge_draft(None, args, &id), Err(AppError::Input(_))));
    }
}
