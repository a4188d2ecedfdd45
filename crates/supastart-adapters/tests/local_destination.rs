//! Destination handling against the real filesystem.

use std::fs;
use std::path::Path;

use supastart_adapters::{LocalFilesystem, RecordingRunner, ScriptedPrompter};
use supastart_core::prelude::*;

/// Writes a one-file starter to disk.
struct DiskTemplate;

impl TemplateFetcher for DiskTemplate {
    fn fetch(&self, _source: &str, destination: &Path) -> SupastartResult<()> {
        fs::create_dir_all(destination).unwrap();
        fs::write(destination.join("package.json"), "{}").unwrap();
        Ok(())
    }
}

fn seed_user_files(dir: &Path) {
    fs::create_dir_all(dir.join("src")).unwrap();
    fs::write(dir.join("precious.txt"), "keep me").unwrap();
    fs::write(dir.join("src/main.rs"), "fn main() {}").unwrap();
}

fn run(base: &Path, name: &str, overwrite: bool) -> (ProvisioningReport, RecordingRunner) {
    let runner = RecordingRunner::new();
    let resolver = InputResolver::new(Box::new(ScriptedPrompter::new()), DEFAULT_PROJECT_NAME);
    let mut ctx = RunContext::new(
        Some(name.to_string()),
        resolver.resolve_project_name(Some(name)),
        "1.0.0",
    );
    let pipeline = ProvisioningPipeline::new(
        Box::new(DiskTemplate),
        Box::new(runner.clone()),
        Box::new(LocalFilesystem::new()),
        PipelineSettings {
            base_dir: base.to_path_buf(),
            overwrite_existing: overwrite,
            ..PipelineSettings::default()
        },
    );
    (pipeline.run(&mut ctx, &resolver, &SilentObserver), runner)
}

#[test]
fn dot_name_leaves_the_working_directory_alone() {
    let base = tempfile::tempdir().unwrap();
    seed_user_files(base.path());

    let (report, runner) = run(base.path(), ".", true);

    assert!(matches!(
        report.outcome,
        PipelineOutcome::Aborted {
            step: PipelineStep::CloneTemplate,
            ..
        }
    ));
    assert!(runner.calls().is_empty());
    assert_eq!(
        fs::read_to_string(base.path().join("precious.txt")).unwrap(),
        "keep me"
    );
    assert_eq!(
        fs::read_to_string(base.path().join("src/main.rs")).unwrap(),
        "fn main() {}"
    );
    assert!(!base.path().join("package.json").exists());
}

#[test]
fn parent_name_leaves_the_parent_alone() {
    let root = tempfile::tempdir().unwrap();
    let base = root.path().join("work");
    fs::create_dir_all(&base).unwrap();
    seed_user_files(root.path());

    let (report, _) = run(&base, "..", true);

    assert!(!report.is_success());
    assert!(root.path().join("precious.txt").exists());
    assert!(root.path().join("src/main.rs").exists());
    assert!(base.exists());
}

#[test]
fn overwrite_keeps_the_previous_project_as_backup() {
    let base = tempfile::tempdir().unwrap();
    let project = base.path().join("demo-app");
    seed_user_files(&project);

    let (report, _) = run(base.path(), "demo-app", true);

    assert!(report.is_success());
    assert!(project.join("package.json").exists());
    assert!(!project.join("precious.txt").exists());
    let backup = base.path().join("demo-app.backup");
    assert_eq!(
        fs::read_to_string(backup.join("precious.txt")).unwrap(),
        "keep me"
    );
    assert!(backup.join("src/main.rs").exists());
}

#[test]
fn file_at_destination_is_refused_without_overwrite() {
    let base = tempfile::tempdir().unwrap();
    fs::write(base.path().join("demo-app"), "notes").unwrap();

    let (report, runner) = run(base.path(), "demo-app", false);

    assert!(!report.is_success());
    assert!(runner.calls().is_empty());
    assert_eq!(
        fs::read_to_string(base.path().join("demo-app")).unwrap(),
        "notes"
    );
}
