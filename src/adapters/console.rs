use crate::core::gesture::Gesture;
use crate::core::{Change, Item, ListObserver, Snapshot};
use crate::utils::error::{RankError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One typed line from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Gesture(Gesture),
    Show,
    Quit,
}

/// Parses `up 2`, `down 1`, `dq 3`, `vote 1`, `show`, `quit`.
///
/// Rows are addressed by the rank currently on screen, resolved against
/// `snapshot` to the item's id.
pub fn parse_command(line: &str, snapshot: &Snapshot) -> Result<ConsoleCommand> {
    let mut parts = line.split_whitespace();
    let verb = parts
        .next()
        .ok_or_else(|| parse_error(line, "empty command"))?
        .to_ascii_lowercase();

    match verb.as_str() {
        "show" | "ls" => return Ok(ConsoleCommand::Show),
        "quit" | "exit" | "q" => return Ok(ConsoleCommand::Quit),
        _ => {}
    }

    let rank: u32 = parts
        .next()
        .ok_or_else(|| parse_error(line, "missing rank"))?
        .parse()
        .map_err(|_| parse_error(line, "rank must be a positive number"))?;

    if parts.next().is_some() {
        return Err(parse_error(line, "too many arguments"));
    }

    let id = snapshot
        .at_rank(rank)
        .map(|item| item.id)
        .ok_or_else(|| parse_error(line, &format!("no cat holds rank {}", rank)))?;

    let gesture = match verb.as_str() {
        "up" | "u" => Gesture::RankUp(id),
        "down" | "d" => Gesture::RankDown(id),
        "dq" | "disqualify" => Gesture::Disqualify(id),
        "vote" | "v" => Gesture::Vote(id),
        other => return Err(parse_error(line, &format!("unknown verb '{}'", other))),
    };

    Ok(ConsoleCommand::Gesture(gesture))
}

fn parse_error(input: &str, reason: &str) -> RankError {
    RankError::GestureParseError {
        input: input.trim().to_string(),
        reason: reason.to_string(),
    }
}

/// Marks the view stale whenever the list reports a change; the console
/// re-reads the snapshot before drawing again.
#[derive(Debug, Clone, Default)]
pub struct ChangeFlag {
    dirty: Arc<AtomicBool>,
}

impl ChangeFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a change happened since the last call, and clears it.
    pub fn take(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }
}

impl ListObserver for ChangeFlag {
    fn on_change(&mut self, change: &Change, _items: &[Item]) {
        tracing::trace!("view marked stale by {:?}", change);
        self.dirty.store(true, Ordering::SeqCst);
    }
}
