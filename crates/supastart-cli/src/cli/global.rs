//! Flags that are not part of the scaffolding request itself.
//!
//! Flattened into [`super::Cli`].

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for INFO, twice for DEBUG, three times for TRACE.
    /// Long form only: `-v` prints the version. Conflicts with `--quiet`.
    #[arg(
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase verbosity (repeat for more)",
        long_help = "Increase logging verbosity:
    (none)               - Only warnings and errors
    --verbose            - Info level (progress messages)
    --verbose --verbose  - Debug level (detailed diagnostics)
    three or more        - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>).
    #[arg(long = "no-color", env = "NO_COLOR", help = "Disable colored output")]
    pub no_color: bool,

    /// Configuration file path.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Do not query the registry for a newer version.
    #[arg(
        long = "skip-update-check",
        help = "Skip the check for a newer published version"
    )]
    pub skip_update_check: bool,
}
