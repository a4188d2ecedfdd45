//! Command runner that records instead of executing.

use std::sync::{Arc, Mutex};

use supastart_core::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandSpec},
    },
    error::SupastartResult,
};

#[derive(Debug, Clone)]
enum Scripted {
    Exit(i32),
    SpawnFailure,
}

#[derive(Debug, Clone)]
struct Rule {
    program: String,
    first_arg: Option<String>,
    response: Scripted,
}

impl Rule {
    fn matches(&self, spec: &CommandSpec) -> bool {
        spec.program == self.program
            && self
                .first_arg
                .as_ref()
                .is_none_or(|arg| spec.args.first() == Some(arg))
    }
}

/// Records every command and answers with scripted exit codes.
///
/// Commands succeed (exit 0) unless a rule says otherwise. Clones share the
/// recorded history.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    rules: Vec<Rule>,
    calls: Arc<Mutex<Vec<CommandSpec>>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `program [first_arg ...]` exit with `code`.
    pub fn exit_with(mut self, program: &str, first_arg: Option<&str>, code: i32) -> Self {
        self.rules.push(Rule {
            program: program.into(),
            first_arg: first_arg.map(Into::into),
            response: Scripted::Exit(code),
        });
        self
    }

    /// Make `program` impossible to start.
    pub fn missing(mut self, program: &str) -> Self {
        self.rules.push(Rule {
            program: program.into(),
            first_arg: None,
            response: Scripted::SpawnFailure,
        });
        self
    }

    /// Every command run so far, in order.
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Recorded commands rendered as strings.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec) -> SupastartResult<i32> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(spec.clone());
        }

        match self.rules.iter().find(|r| r.matches(spec)).map(|r| &r.response) {
            None => Ok(0),
            Some(Scripted::Exit(code)) => Ok(*code),
            Some(Scripted::SpawnFailure) => Err(ApplicationError::CommandSpawn {
                command: spec.to_string(),
                reason: format!("`{}` not found", spec.program),
            }
            .into()),
        }
    }
}
