//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text. No business logic lives here.

use clap::Parser;

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// clap's built-in version flag is disabled: `-v/--version` must run after
/// the self-update check, so it is an ordinary flag handled in `main`.
#[derive(Debug, Parser)]
#[command(
    name     = "create-next-supabase",
    bin_name = "create-next-supabase",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Bootstrap a Next.js + Supabase project",
    long_about = "create-next-supabase clones the Next.js + Supabase starter, \
                  installs its dependencies, and optionally initializes git.",
    after_help = "EXAMPLES:\n\
        \x20 create-next-supabase my-app\n\
        \x20 create-next-supabase              # prompts for a name\n\
        \x20 create-next-supabase --version",
    disable_version_flag = true,
)]
pub struct Cli {
    /// Project directory to create. Prompted for when omitted.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: Option<String>,

    /// Print the version and exit.
    #[arg(short = 'v', long = "version", help = "Print version")]
    pub version: bool,

    /// Flags shared by every invocation.
    #[command(flatten)]
    pub global: GlobalArgs,
}

// ── tests ─────────────────────────────────────────────────────────────────────
