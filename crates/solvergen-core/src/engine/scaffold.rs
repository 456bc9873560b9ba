use super::error::{GeneratorError, Result};
use super::tools::build::Toolchain;
use super::tools::runner::CommandRunner;
use crate::core::models::project::ProjectConfig;
use crate::core::templates::{SUPPORT_LIBRARY, SUPPORT_LIBRARY_DIR};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    /// The destination was absent and a fresh package skeleton was created.
    Initialized,
    /// The destination already existed; its contents were left in place.
    AlreadyPresent,
}

/// Creates the package skeleton at the destination unless it already exists.
///
/// Existing destinations are never cleaned. Files from a previous generation that are
/// not rewritten later in the run survive untouched.
pub fn prepare_destination(
    config: &ProjectConfig,
    runner: &dyn CommandRunner,
    toolchain: &Toolchain,
) -> Result<ScaffoldOutcome> {
    let destination = config.destination();
    if destination.exists() {
        debug!(
            destination = %destination.display(),
            "Destination exists; skipping package initialization."
        );
        return Ok(ScaffoldOutcome::AlreadyPresent);
    }

    fs::create_dir_all(&destination).map_err(GeneratorError::io(&destination))?;
    let init = toolchain.init_command(&config.identity.name, &destination);
    info!(command = %init, "Initializing package skeleton.");
    runner.run(&init)?;
    Ok(ScaffoldOutcome::Initialized)
}

/// Writes every file of the static support library below `destination/icasadi`,
/// overwriting whatever was there.
pub fn copy_support_library(destination: &Path) -> Result<()> {
    let root = destination.join(SUPPORT_LIBRARY_DIR);
    for file in SUPPORT_LIBRARY {
        let path = root.join(file.path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(GeneratorError::io(parent))?;
        }
        fs::write(&path, file.contents).map_err(GeneratorError::io(&path))?;
        debug!(file = %path.display(), "Copied support file.");
    }
    Ok(())
}

pub fn scaffold(
    config: &ProjectConfig,
    runner: &dyn CommandRunner,
    toolchain: &Toolchain,
) -> Result<ScaffoldOutcome> {
    let outcome = prepare_destination(config, runner, toolchain)?;
    copy_support_library(&config.destination())?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::project::tests::demo_builder;
    use crate::core::templates::embedded;
    use crate::engine::tools::runner::testing::RecordingRunner;

    #[test]
    fn fresh_destination_is_initialized_and_populated() {
        let dir = tempfile::tempdir().unwrap();
        let config = demo_builder().directory(dir.path().into()).build().unwrap();
        let runner = RecordingRunner::new();

        let outcome = scaffold(&config, &runner, &Toolchain::default()).unwrap();

        assert_eq!(outcome, ScaffoldOutcome::Initialized);
        assert_eq!(
            runner.commands(),
            vec!["cargo init --bin --vcs none --name demo"]
        );
        assert_eq!(
            runner.invocations.borrow()[0].current_dir,
            dir.path().join("demo")
        );
        let support = dir.path().join("demo").join("icasadi");
        for file in SUPPORT_LIBRARY {
            assert!(support.join(file.path()).is_file(), "{} missing", file.relative_path);
        }
    }

    #[test]
    fn existing_destination_is_not_reinitialized_but_support_files_are_refreshed() {
        let dir = tempfile::tempdir().unwrap();
        let config = demo_builder().directory(dir.path().into()).build().unwrap();
        let runner = RecordingRunner::new();
        scaffold(&config, &runner, &Toolchain::default()).unwrap();

        let destination = config.destination();
        let stale = destination.join("icasadi").join("extern").join("icasadi.c");
        fs::write(&stale, "stale").unwrap();
        let keep = destination.join("notes.txt");
        fs::write(&keep, "mine").unwrap();

        let outcome = scaffold(&config, &runner, &Toolchain::default()).unwrap();

        assert_eq!(outcome, ScaffoldOutcome::AlreadyPresent);
        assert_eq!(runner.commands().len(), 1);
        assert_eq!(fs::read_to_string(&stale).unwrap(), embedded::ICASADI_C);
        assert_eq!(fs::read_to_string(&keep).unwrap(), "mine");
    }

    #[test]
    fn failed_initializer_aborts_scaffolding() {
        let dir = tempfile::tempdir().unwrap();
        let config = demo_builder().directory(dir.path().into()).build().unwrap();
        let runner = RecordingRunner::with_hook(|invocation| {
            Err(crate::engine::tools::runner::ToolError::Failed {
                command: invocation.to_string(),
                code: Some(101),
            })
        });

        let result = scaffold(&config, &runner, &Toolchain::default());

        assert!(matches!(result, Err(GeneratorError::Tool(_))));
        assert!(!config.destination().join("icasadi").exists());
    }
}
