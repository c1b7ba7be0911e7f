//! Interactive prompts using dialoguer

use std::io;

use anyhow::Result;
use dialoguer::Input;

/// What the user asked for at the selection prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index into the candidate list.
    Index(usize),
    All,
    Quit,
    /// Unusable input; the message explains why.
    Invalid(String),
}

/// Keywords that end the interactive session.
pub const QUIT_KEYWORDS: [&str; 4] = ["0", "exit", "quit", "q"];

/// Keyword that converts every candidate.
pub const ALL_KEYWORD: &str = "all";

/// Interpret one line of input against a list of `count` candidates.
pub fn parse_selection(input: &str, count: usize) -> Selection {
    let normalized = input.trim().to_lowercase();

    if QUIT_KEYWORDS.contains(&normalized.as_str()) {
        return Selection::Quit;
    }
    if normalized == ALL_KEYWORD {
        return Selection::All;
    }

    match normalized.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Selection::Index(n - 1),
        Ok(n) => Selection::Invalid(format!(
            "Invalid number: {} (choose 1-{}, 'all', or 0 to quit)",
            n, count
        )),
        Err(_) => Selection::Invalid(format!(
            "Please enter a valid number, 'all', or 0 to quit (got '{}')",
            input.trim()
        )),
    }
}

/// Source of raw selection input. `None` means input ended.
pub trait SelectionSource {
    fn next_input(&mut self, count: usize) -> Result<Option<String>>;
}

/// Reads selections from the terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl SelectionSource for TerminalPrompt {
    fn next_input(&mut self, count: usize) -> Result<Option<String>> {
        let prompt = format!("Number (1-{}, 'all', 0 to quit)", count);
        match Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => Ok(Some(line)),
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
