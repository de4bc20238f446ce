//! Interactive terminal input.

use std::io::Write;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Print,
    terminal::{self, ClearType},
};

use crate::error::{AppError, Result};

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn print_prompt(out: &mut impl Write, prompt: &str) -> Result<()> {
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        Print(prompt)
    )?;
    out.flush()?;
    Ok(())
}

fn next_key() -> Result<(KeyCode, KeyModifiers)> {
    loop {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok((code, modifiers));
        }
    }
}

/// Reads a line without echoing it; each key shows as `*`.
pub fn password(prompt: &str) -> Result<String> {
    let _raw = RawModeGuard::enter()?;
    let mut out = std::io::stderr();
    print_prompt(&mut out, prompt)?;

    let mut buf = String::new();
    loop {
        match next_key()? {
            (KeyCode::Enter, _) => {
                execute!(out, Print("\r\n"))?;
                break;
            }
            (KeyCode::Backspace, _) => {
                if buf.pop().is_some() {
                    execute!(out, cursor::MoveLeft(1), Print(" "), cursor::MoveLeft(1))?;
                }
            }
            (KeyCode::Char('c'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
                execute!(out, Print("\r\n"))?;
                return Err(AppError::Terminal("interrupted".to_string()));
            }
            (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
                buf.push(ch);
                execute!(out, Print("*"))?;
            }
            _ => {}
        }
        out.flush()?;
    }

    Ok(buf)
}

/// Asks a y/N question; anything but `y` declines.
pub fn confirm(question: &str) -> Result<bool> {
    let _raw = RawModeGuard::enter()?;
    let mut out = std::io::stderr();
    print_prompt(&mut out, &format!("{question} [y/N] "))?;

    let answer = loop {
        match next_key()? {
            (KeyCode::Char('c'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
                break false;
            }
            (KeyCode::Char(ch), _) => break ch.eq_ignore_ascii_case(&'y'),
            (KeyCode::Enter | KeyCode::Esc, _) => break false,
            _ => {}
        }
    };

    execute!(out, Print(if answer { "y\r\n" } else { "n\r\n" }))?;
    out.flush()?;
    Ok(answer)
}
