//! Child processes with inherited stdio.

use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use supastart_core::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandSpec},
    },
    error::SupastartResult,
};

/// Runs commands for real, streaming their output to the user's terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    #[instrument(skip_all, fields(command = %spec))]
    fn run(&self, spec: &CommandSpec) -> SupastartResult<i32> {
        // Resolve through PATH (and PATHEXT on Windows, where `pnpm` is a
        // `.cmd` shim) so a missing tool is reported as such.
        let program = which::which(&spec.program).map_err(|e| ApplicationError::CommandSpawn {
            command: spec.to_string(),
            reason: format!("`{}` not found: {e}", spec.program),
        })?;

        let mut cmd = Command::new(&program);
        cmd.args(&spec.args)
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &spec.cwd {
            cmd.current_dir(dir);
        }

        debug!(program = %program.display(), "Spawning");
        let status = cmd.status().map_err(|e| ApplicationError::CommandSpawn {
            command: spec.to_string(),
            reason: e.to_string(),
        })?;

        status.code().ok_or_else(|| {
            ApplicationError::CommandTerminated {
                command: spec.to_string(),
            }
            .into()
        })
    }
}
