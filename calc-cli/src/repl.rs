//! Line handling for `calc repl`.
//!
//! Each input line is either a key sequence for the session calculator or one
//! of the session commands listed by [`HELP`].

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::{commands, logging, state::AppState};

pub const HELP: &str = "\
key sequences: 0-9 . + - * x / = % n(±) <(⌫) c(clear)
commands:
  history            list finished calculations
  clear-history      forget them
  money <keys>       type into a money-entry field
  level <filter>     change the log filter
  log-file <path>    append logs to a file, `log-file off` to stop
  help               show this text
  quit               leave";

/// What a single input line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Keys(String),
    Money(String),
    History,
    ClearHistory,
    LogLevel(String),
    LogFile(Option<PathBuf>),
    Help,
    Quit,
}

impl ReplCommand {
    /// Lines that are not a known command are treated as key sequences.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match (word, rest) {
            ("history", "") => Self::History,
            ("clear-history", "") => Self::ClearHistory,
            ("help" | "?", "") => Self::Help,
            ("quit" | "exit", "") => Self::Quit,
            ("money", keys) => Self::Money(keys.to_string()),
            ("level", filter) if !filter.is_empty() => Self::LogLevel(filter.to_string()),
            ("log-file", "off") => Self::LogFile(None),
            ("log-file", path) if !path.is_empty() => Self::LogFile(Some(PathBuf::from(path))),
            _ => Self::Keys(line.to_string()),
        }
    }
}

/// Result of handling one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplOutcome {
    Print(String),
    Quit,
}

/// Runs one input line against the session.
///
/// # Errors
///
/// Returns an error for unknown keys, invalid log filters or an unwritable log
/// file. The session stays usable afterwards.
pub fn handle_line(
    state: &mut AppState,
    line: &str,
) -> Result<ReplOutcome> {
    let output = match ReplCommand::parse(line) {
        ReplCommand::Quit => return Ok(ReplOutcome::Quit),
        ReplCommand::Help => HELP.to_string(),
        ReplCommand::Keys(sequence) => commands::run_keys(state, &sequence)?,
        ReplCommand::Money(sequence) => commands::run_money_keys(state, &sequence)?,
        ReplCommand::History => render_history(state)?,
        ReplCommand::ClearHistory => {
            state.clear_history()?;
            "history cleared".to_string()
        }
        ReplCommand::LogLevel(filter) => {
            logging::set_log_level(&filter)?;
            info!(%filter, "log filter changed");
            format!("log filter set to {filter}")
        }
        ReplCommand::LogFile(Some(path)) => {
            logging::enable_file_logging(&path)?;
            format!("logging to {}", path.display())
        }
        ReplCommand::LogFile(None) => {
            logging::disable_file_logging();
            "file logging off".to_string()
        }
    };
    Ok(ReplOutcome::Print(output))
}

fn render_history(state: &AppState) -> Result<String> {
    let entries = state.history()?;
    if entries.is_empty() {
        return Ok("no calculations yet".to_string());
    }

    Ok(entries
        .iter()
        .map(|entry| {
            format!(
                "{}  {} = {}",
                entry.recorded_at.with_timezone(&chrono::Local).format("%H:%M:%S"),
                entry.description,
                entry.result
            )
        })
        .collect::<Vec<_>>()
        .join("\n"))
}
