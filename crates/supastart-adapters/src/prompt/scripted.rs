//! Prompter that replays canned answers, for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use supastart_core::{
    application::{ApplicationError, ports::Prompter},
    error::SupastartResult,
};

#[derive(Debug, Clone)]
enum Answer {
    Text(String),
    Confirm(bool),
    Unavailable,
}

/// Replays queued answers in order and records every prompt shown.
///
/// An empty queue answers with the offered default.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    answers: Arc<Mutex<VecDeque<Answer>>>,
    asked: Arc<Mutex<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_text(self, answer: &str) -> Self {
        self.push(Answer::Text(answer.to_string()))
    }

    pub fn answer_confirm(self, answer: bool) -> Self {
        self.push(Answer::Confirm(answer))
    }

    /// The next prompt fails as if no terminal were attached.
    pub fn unavailable(self) -> Self {
        self.push(Answer::Unavailable)
    }

    fn push(self, answer: Answer) -> Self {
        if let Ok(mut answers) = self.answers.lock() {
            answers.push_back(answer);
        }
        self
    }

    /// Prompts shown so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }

    fn next(&self, prompt: &str) -> Option<Answer> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(prompt.to_string());
        }
        self.answers.lock().ok()?.pop_front()
    }
}

fn unavailable() -> supastart_core::error::SupastartError {
    ApplicationError::PromptUnavailable {
        reason: "scripted prompt failure".into(),
    }
    .into()
}

impl Prompter for ScriptedPrompter {
    fn ask_text(&self, prompt: &str, default: &str) -> SupastartResult<String> {
        match self.next(prompt) {
            Some(Answer::Text(text)) => Ok(text),
            Some(Answer::Unavailable) => Err(unavailable()),
            Some(Answer::Confirm(_)) | None => Ok(default.to_string()),
        }
    }

    fn ask_confirm(&self, prompt: &str, default: bool) -> SupastartResult<bool> {
        match self.next(prompt) {
            Some(Answer::Confirm(answer)) => Ok(answer),
            Some(Answer::Unavailable) => Err(unavailable()),
            Some(Answer::Text(_)) | None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_in_order_then_defaults() {
        let prompter = ScriptedPrompter::new()
            .answer_text("demo-app")
            .answer_confirm(false);

        assert_eq!(prompter.ask_text("name?", "x").unwrap(), "demo-app");
        assert!(!prompter.ask_confirm("git?", true).unwrap());
        assert!(prompter.ask_confirm("again?", true).unwrap());
        assert_eq!(prompter.asked(), vec!["name?", "git?", "again?"]);
    }

    #[test]
    fn unavailable_answer_errors() {
        let prompter = ScriptedPrompter::new().unavailable();
        assert!(prompter.ask_text("name?", "x").is_err());
    }
}
