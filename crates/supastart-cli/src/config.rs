//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only sees the values it is built
//! with.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `SUPASTART_<SECTION>__<KEY>`, e.g.
//!    `SUPASTART_TEMPLATE__FORCE=false`
//! 3. Config file: `--config FILE`, else `config.toml` in the platform
//!    config directory (optional)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use supastart_adapters::registry::NPM_REGISTRY;
use supastart_core::{
    application::{PipelineSettings, ports::CommandSpec},
    domain::DEFAULT_PROJECT_NAME,
};

const ENV_PREFIX: &str = "SUPASTART";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Self-update check.
    pub update: UpdateConfig,
    /// Where the starter comes from.
    pub template: TemplateConfig,
    /// Defaults for the generated project.
    pub project: ProjectConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    /// Set to `false` to never query the registry.
    pub check: bool,
    pub registry_url: String,
    pub package: String,
    /// Registry request timeout. Unset means the transport default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Program and arguments that run the latest published version.
    pub launcher: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub url: String,
    /// Move an existing project directory aside instead of refusing.
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub default_name: String,
    pub package_manager: String,
    pub commit_message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            check: true,
            registry_url: NPM_REGISTRY.into(),
            package: "create-next-supabase".into(),
            timeout_secs: None,
            launcher: vec![
                "pnpm".into(),
                "dlx".into(),
                "create-next-supabase@latest".into(),
            ],
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        let pipeline = PipelineSettings::default();
        Self {
            url: pipeline.template_url,
            force: pipeline.overwrite_existing,
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        let pipeline = PipelineSettings::default();
        Self {
            default_name: DEFAULT_PROJECT_NAME.into(),
            package_manager: pipeline.package_manager,
            commit_message: pipeline.commit_message,
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path passed via `--config`; it must exist. When
    /// `None`, the default location is read if present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let settings = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(" ")
                    .with_list_parse_key("update.launcher")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.update.launcher.is_empty() {
            anyhow::bail!("update.launcher must name a program");
        }
        if self.project.package_manager.trim().is_empty() {
            anyhow::bail!("project.package_manager must not be empty");
        }
        Ok(())
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.create-next-supabase.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "supastart", "create-next-supabase")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".create-next-supabase.toml"))
    }

    pub fn registry_timeout(&self) -> Option<Duration> {
        self.update.timeout_secs.map(Duration::from_secs)
    }

    /// The relaunch command. `validate` guarantees a program is present.
    pub fn launcher(&self) -> CommandSpec {
        let mut parts = self.update.launcher.iter();
        let program = parts.next().map(String::as_str).unwrap_or("pnpm");
        CommandSpec::new(program).args(parts.cloned())
    }

    /// Pipeline settings for a run rooted at `base_dir`.
    pub fn pipeline_settings(&self, base_dir: PathBuf) -> PipelineSettings {
        PipelineSettings {
            template_url: self.template.url.clone(),
            overwrite_existing: self.template.force,
            package_manager: self.project.package_manager.clone(),
            commit_message: self.project.commit_message.clone(),
            base_dir,
        }
    }
}
