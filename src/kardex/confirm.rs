//! Yes/no gate for destructive actions.
//!
//! One prompt at a time: `confirm` takes `&mut self`, so a second request
//! cannot be issued while one is outstanding.

use crate::error::Result;
use std::collections::VecDeque;
use std::io::{self, Write};

pub trait ConfirmGate {
    /// Shows `message` and blocks until the user answers. Resolves to
    /// `true` only on an explicit yes.
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Reads a y/N answer from stdin. Anything other than `y`/`yes` counts as
/// no, so a stray Enter never destroys data.
#[derive(Default)]
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl ConfirmGate for TerminalPrompt {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        print!("{} [y/N]: ", message);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        let answer = input.trim().to_lowercase();
        Ok(answer == "y" || answer == "yes")
    }
}

/// Pre-programmed answers for testing. Runs dry into "no".
#[derive(Default)]
pub struct ScriptedGate {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedGate {
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// The messages shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.asked
    }
}

impl ConfirmGate for ScriptedGate {
    fn confirm(&mut self, message: &str) -> Result<bool> {
        self.asked.push(message.to_string());
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_gate_replays_answers_then_defaults_to_no() {
        let mut gate = ScriptedGate::answering([true, false]);
        assert!(gate.confirm("first?").unwrap());
        assert!(!gate.confirm("second?").unwrap());
        assert!(!gate.confirm("third?").unwrap());
        assert_eq!(gate.prompts().len(), 3);
    }
}
