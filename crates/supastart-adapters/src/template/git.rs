//! Template transport over `git clone`.
//!
//! Only the files are kept: the clone is shallow and its `.git` directory is
//! removed afterwards, so the new project starts without the template's
//! history. Nothing is cached between runs.

use std::path::Path;

use tracing::{debug, instrument};

use supastart_core::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandSpec, TemplateFetcher},
    },
    error::{SupastartError, SupastartResult},
};

use crate::filesystem::map_io_error;

pub struct GitTemplateFetcher {
    runner: Box<dyn CommandRunner>,
}

impl GitTemplateFetcher {
    pub fn new(runner: Box<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn clone_command(source: &str, destination: &Path) -> CommandSpec {
        CommandSpec::new("git").args([
            "clone".to_string(),
            "--depth".to_string(),
            "1".to_string(),
            "--quiet".to_string(),
            source.to_string(),
            destination.display().to_string(),
        ])
    }
}

impl TemplateFetcher for GitTemplateFetcher {
    #[instrument(skip(self), fields(destination = %destination.display()))]
    fn fetch(&self, source: &str, destination: &Path) -> SupastartResult<()> {
        let spec = Self::clone_command(source, destination);

        let code = self.runner.run(&spec).map_err(|e| match e {
            SupastartError::Application(ApplicationError::CommandSpawn { reason, .. }) => {
                ApplicationError::TemplateFetch {
                    source_url: source.to_string(),
                    reason,
                }
                .into()
            }
            other => other,
        })?;

        if code != 0 {
            return Err(ApplicationError::TemplateFetch {
                source_url: source.to_string(),
                reason: format!("git clone exited with status {code}"),
            }
            .into());
        }

        let history = destination.join(".git");
        if history.exists() {
            debug!("Dropping template history");
            std::fs::remove_dir_all(&history)
                .map_err(|e| map_io_error(&history, e, "remove template history"))?;
        }

        Ok(())
    }
}
