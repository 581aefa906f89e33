// src/prompt.rs
//! Sequential question/answer input, used by the prompt-based apply flow and delete confirmation

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

pub trait Prompter: Confirm {
    /// `None` means the user cancelled.
    fn ask(&mut self, label: &str) -> Option<String>;
}

/// Reads answers from stdin, one line per question.
#[derive(Debug, Default)]
pub struct StdinPrompter {
    assume_yes: bool,
}

impl StdinPrompter {
    /// Answer every confirmation with yes without reading stdin (`--yes`).
    pub fn assume_yes() -> Self {
        Self { assume_yes: true }
    }

    fn read_line(label: &str) -> Option<String> {
        print!("{}: ", label);
        io::stdout().flush().ok()?;

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl Confirm for StdinPrompter {
    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        Self::read_line(&format!("{} [y/N]", question))
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }
}

impl Prompter for StdinPrompter {
    fn ask(&mut self, label: &str) -> Option<String> {
        Self::read_line(label)
    }
}

/// Pre-recorded answers, consumed in order. Test support, not part of the public API.
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Option<String>>,
    confirmations: VecDeque<bool>,
    pub asked: Vec<String>,
}

#[doc(hidden)]
impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(|a| Some(a.into())).collect(),
            ..Self::default()
        }
    }

    pub fn cancel_next(mut self) -> Self {
        self.answers.push_back(None);
        self
    }

    pub fn with_confirmations(mut self, confirmations: impl IntoIterator<Item = bool>) -> Self {
        self.confirmations.extend(confirmations);
        self
    }
}

impl Confirm for ScriptedPrompter {
    fn confirm(&mut self, question: &str) -> bool {
        self.asked.push(question.to_string());
        self.confirmations.pop_front().unwrap_or(false)
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, label: &str) -> Option<String> {
        self.asked.push(label.to_string());
        self.answers.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let mut prompter = ScriptedPrompter::new(["a", "b"]).cancel_next();
        assert_eq!(prompter.ask("first").as_deref(), Some("a"));
        assert_eq!(prompter.ask("second").as_deref(), Some("b"));
        assert_eq!(prompter.ask("third"), None);
        assert_eq!(prompter.ask("fourth"), None);
        assert_eq!(prompter.asked, vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn test_confirmations_default_to_no() {
        let mut prompter = ScriptedPrompter::default().with_confirmations([true]);
        assert!(prompter.confirm("Delete?"));
        assert!(!prompter.confirm("Delete again?"));
        assert!(StdinPrompter::assume_yes().confirm("anything"));
    }
}
