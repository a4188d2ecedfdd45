//! Self-Update Gate - decides whether this process may continue.
//!
//! ```text
//!            ┌──────────┐
//!            │ Checking │
//!            └────┬─────┘
//!   up-to-date    │ unknown          stale
//!      ┌──────────┼──────────────────┐
//!      ▼          ▼                  ▼
//!   Proceed  WarnAndProceed   RelaunchAndExit
//! ```
//!
//! A stale tool runs the latest published version as a child process with
//! the original arguments and exits with the child's code.

use tracing::{error, info, instrument, warn};

use crate::{
    application::{
        ports::{CommandRunner, CommandSpec},
        services::VersionOracle,
    },
    domain::{VersionStatus, VersionVerdict},
};

/// Set on the relaunched child so it does not check (and relaunch) again.
pub const RELAUNCH_GUARD_ENV: &str = "CREATE_NEXT_SUPABASE_RELAUNCHED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Current, or the check was bypassed.
    Proceed,
    /// The registry could not be consulted; continue anyway.
    WarnAndProceed { reason: String },
    /// A newer version is published; hand over to it.
    RelaunchAndExit { current: String, latest: String },
}

/// Result of handing over to the latest version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelaunchOutcome {
    /// The child ran to completion with this exit code.
    Exited(i32),
    /// The child could not be started.
    FailedToStart { reason: String },
}

impl RelaunchOutcome {
    /// Exit code this process should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Exited(code) => *code,
            Self::FailedToStart { .. } => 1,
        }
    }
}

pub struct SelfUpdateGate {
    oracle: VersionOracle,
    runner: Box<dyn CommandRunner>,
    launcher: CommandSpec,
    already_relaunched: bool,
}

impl SelfUpdateGate {
    /// `launcher` is the command that runs the latest published version,
    /// e.g. `pnpm dlx create-next-supabase@latest`. Forwarded arguments are
    /// appended to it.
    pub fn new(
        oracle: VersionOracle,
        runner: Box<dyn CommandRunner>,
        launcher: CommandSpec,
    ) -> Self {
        Self {
            oracle,
            runner,
            launcher,
            already_relaunched: false,
        }
    }

    /// Mark this process as the product of a relaunch.
    pub fn with_relaunch_guard(mut self, already_relaunched: bool) -> Self {
        self.already_relaunched = already_relaunched;
        self
    }

    /// Run the version check and decide.
    #[instrument(skip(self))]
    pub fn decide(&self, current: &str) -> GateDecision {
        if self.already_relaunched {
            info!("Running as relaunched child, skipping version check");
            return GateDecision::Proceed;
        }

        let decision = Self::decision_for(self.oracle.check_latest_version(current));
        match &decision {
            GateDecision::Proceed => info!("Tool is current"),
            GateDecision::WarnAndProceed { reason } => {
                warn!(%reason, "Proceeding without update check")
            }
            GateDecision::RelaunchAndExit { latest, .. } => {
                info!(%latest, "Newer version published")
            }
        }
        decision
    }

    fn decision_for(verdict: VersionVerdict) -> GateDecision {
        match (verdict.status, verdict.latest) {
            (VersionStatus::UpToDate, _) => GateDecision::Proceed,
            (VersionStatus::Stale, Some(latest)) => GateDecision::RelaunchAndExit {
                current: verdict.current,
                latest,
            },
            (VersionStatus::Stale, None) | (VersionStatus::Unknown, _) => {
                GateDecision::WarnAndProceed {
                    reason: "the registry did not report a usable version".into(),
                }
            }
        }
    }

    /// Run the latest version with `forwarded_args` and wait for it.
    ///
    /// Exactly one attempt is made.
    #[instrument(skip(self, forwarded_args), fields(args = forwarded_args.len()))]
    pub fn relaunch(&self, forwarded_args: &[String]) -> RelaunchOutcome {
        let spec = self
            .launcher
            .clone()
            .args(forwarded_args.iter().cloned())
            .env(RELAUNCH_GUARD_ENV, "1");

        info!(command = %spec, "Relaunching latest version");

        match self.runner.run(&spec) {
            Ok(code) => {
                info!(code, "Relaunched process exited");
                RelaunchOutcome::Exited(code)
            }
            Err(e) => {
                error!(error = %e, "Relaunch failed");
                RelaunchOutcome::FailedToStart {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// The launcher command, for display.
    pub fn launcher(&self) -> &CommandSpec {
        &self.launcher
    }
}

impl std::fmt::Debug for SelfUpdateGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelfUpdateGate")
            .field("package", &self.oracle.package())
            .field("launcher", &self.launcher.to_string())
            .field("already_relaunched", &self.already_relaunched)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::output::{MockCommandRunner, MockVersionRegistry},
    };

    fn registry_with(latest: Option<&'static str>) -> Box<MockVersionRegistry> {
        let mut registry = MockVersionRegistry::new();
        registry.expect_latest_version().returning(move |_| match latest {
            Some(v) => Ok(v.to_string()),
            None => Err(ApplicationError::RegistryUnavailable {
                reason: "offline".into(),
            }
            .into()),
        });
        Box::new(registry)
    }

    fn launcher() -> CommandSpec {
        CommandSpec::new("pnpm").args(["dlx", "create-next-supabase@latest"])
    }

    fn gate(latest: Option<&'static str>, runner: MockCommandRunner) -> SelfUpdateGate {
        let oracle = VersionOracle::new(registry_with(latest), "create-next-supabase");
        SelfUpdateGate::new(oracle, Box::new(runner), launcher())
    }

    #[test]
    fn up_to_date_proceeds() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();
        assert_eq!(gate(Some("1.0.0"), runner).decide("1.0.0"), GateDecision::Proceed);
    }

    #[test]
    fn unreachable_registry_warns_and_proceeds() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();
        assert!(matches!(
            gate(None, runner).decide("1.0.0"),
            GateDecision::WarnAndProceed { .. }
        ));
    }

    #[test]
    fn stale_requests_relaunch() {
        let decision = gate(Some("1.1.0"), MockCommandRunner::new()).decide("1.0.0");
        assert_eq!(
            decision,
            GateDecision::RelaunchAndExit {
                current: "1.0.0".into(),
                latest: "1.1.0".into(),
            }
        );
    }

    #[test]
    fn relaunch_guard_skips_the_registry() {
        let mut registry = MockVersionRegistry::new();
        registry.expect_latest_version().never();
        let oracle = VersionOracle::new(Box::new(registry), "create-next-supabase");
        let gate = SelfUpdateGate::new(oracle, Box::new(MockCommandRunner::new()), launcher())
            .with_relaunch_guard(true);
        assert_eq!(gate.decide("0.0.1"), GateDecision::Proceed);
    }

    #[test]
    fn relaunch_forwards_args_verbatim_once() {
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|spec: &CommandSpec| {
                spec.program == "pnpm"
                    && spec.args
                        == ["dlx", "create-next-supabase@latest", " demo app ", "--version"]
                    && spec
                        .env
                        .contains(&(RELAUNCH_GUARD_ENV.to_string(), "1".to_string()))
            })
            .times(1)
            .returning(|_| Ok(0));

        let outcome = gate(Some("9.9.9"), runner)
            .relaunch(&[" demo app ".to_string(), "--version".to_string()]);
        assert_eq!(outcome, RelaunchOutcome::Exited(0));
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn child_exit_code_is_propagated() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|_| Ok(42));
        assert_eq!(gate(Some("9.9.9"), runner).relaunch(&[]).exit_code(), 42);
    }

    #[test]
    fn spawn_failure_exits_with_one() {
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(1).returning(|spec| {
            Err(ApplicationError::CommandSpawn {
                command: spec.to_string(),
                reason: "pnpm not found".into(),
            }
            .into())
        });
        let outcome = gate(Some("9.9.9"), runner).relaunch(&[]);
        assert!(matches!(outcome, RelaunchOutcome::FailedToStart { .. }));
        assert_eq!(outcome.exit_code(), 1);
    }
}
