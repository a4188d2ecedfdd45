//! Self-update check that runs before anything else.
//!
//! Wires the registry and process adapters into a [`SelfUpdateGate`] and
//! translates its decision into "carry on" or "exit with this code".

use std::process::ExitCode;

use tracing::{debug, instrument, warn};

use supastart_adapters::{HttpRegistry, SystemCommandRunner};
use supastart_core::{
    VERSION,
    application::{GateDecision, RELAUNCH_GUARD_ENV, RelaunchOutcome, SelfUpdateGate, VersionOracle},
};

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// What `main` should do after the check.
#[derive(Debug)]
pub enum UpdateOutcome {
    Continue,
    /// A newer version ran in our place; exit with its code.
    Exit(ExitCode),
}

#[instrument(skip_all)]
pub fn execute(
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<UpdateOutcome> {
    if global.skip_update_check || !config.update.check {
        debug!("Update check disabled");
        return Ok(UpdateOutcome::Continue);
    }

    let registry = match HttpRegistry::new(&config.update.registry_url, config.registry_timeout()) {
        Ok(registry) => registry,
        Err(e) => {
            warn!(error = %e, "Registry client unavailable");
            output.warning(&format!("Could not check for updates: {e}"))?;
            return Ok(UpdateOutcome::Continue);
        }
    };

    let gate = SelfUpdateGate::new(
        VersionOracle::new(Box::new(registry), config.update.package.as_str()),
        Box::new(SystemCommandRunner::new()),
        config.launcher(),
    )
    .with_relaunch_guard(std::env::var_os(RELAUNCH_GUARD_ENV).is_some());

    let spinner = output.spinner("Checking for updates...");
    let decision = gate.decide(VERSION);
    spinner.finish_and_clear();

    match decision {
        GateDecision::Proceed => Ok(UpdateOutcome::Continue),
        GateDecision::WarnAndProceed { reason } => {
            output.warning(&format!(
                "Could not check for updates ({reason}); continuing with {VERSION}"
            ))?;
            Ok(UpdateOutcome::Continue)
        }
        GateDecision::RelaunchAndExit { current, latest } => {
            output.info(&format!(
                "A newer version is available ({current} \u{2192} {latest}). Running it now..."
            ))?;
            relaunch(&gate)
        }
    }
}

fn relaunch(gate: &SelfUpdateGate) -> CliResult<UpdateOutcome> {
    let forwarded = forwarded_args();
    match gate.relaunch(&forwarded) {
        RelaunchOutcome::Exited(code) => Ok(UpdateOutcome::Exit(ExitCode::from(exit_code(code)))),
        RelaunchOutcome::FailedToStart { reason } => Err(CliError::RelaunchFailed {
            command: gate.launcher().to_string(),
            reason,
        }),
    }
}

/// The arguments this process was started with, minus the program name.
fn forwarded_args() -> Vec<String> {
    std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

/// Codes outside `0..=255` cannot be passed on verbatim.
fn exit_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
