use super::runner::{CommandRunner, Invocation};
use crate::core::models::project::{BuildConfig, BuildMode};
use crate::engine::error::Result;
use std::path::Path;
use tracing::info;

pub const DEFAULT_CARGO: &str = "cargo";

/// The build tool used for both the support library and the generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub cargo: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            cargo: DEFAULT_CARGO.to_string(),
        }
    }
}

impl Toolchain {
    pub fn new(cargo: impl Into<String>) -> Self {
        Self {
            cargo: cargo.into(),
        }
    }

    /// `cargo init` for a fresh binary package named `name` in `dir`.
    pub fn init_command(&self, name: &str, dir: &Path) -> Invocation {
        Invocation::new(&self.cargo, dir).args(["init", "--bin", "--vcs", "none", "--name", name])
    }

    /// `cargo build`, plus `--target=<triple>` for cross compilation and `--release`
    /// in release mode, in that order.
    pub fn build_command(&self, build: &BuildConfig, dir: &Path) -> Invocation {
        let mut invocation = Invocation::new(&self.cargo, dir).arg("build");
        if let Some(triple) = build.target.triple() {
            invocation = invocation.arg(format!("--target={}", triple));
        }
        if build.mode == BuildMode::Release {
            invocation = invocation.arg("--release");
        }
        invocation
    }
}

/// Builds the crate in `dir` and surfaces a non-zero exit as an error.
pub fn run_build(
    runner: &dyn CommandRunner,
    toolchain: &Toolchain,
    build: &BuildConfig,
    dir: &Path,
) -> Result<()> {
    let invocation = toolchain.build_command(build, dir);
    info!(
        command = %invocation,
        cwd = %dir.display(),
        "Running build command."
    );
    runner.run(&invocation)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::project::Target;
    use crate::engine::error::GeneratorError;
    use crate::engine::tools::runner::ToolError;
    use crate::engine::tools::runner::testing::RecordingRunner;
    use std::path::PathBuf;

    fn build_config(target: &str, mode: BuildMode) -> BuildConfig {
        BuildConfig {
            directory: PathBuf::from("out"),
            target: target.parse::<Target>().unwrap(),
            mode,
            optimizer_path: "../..".into(),
        }
    }

    #[test]
    fn release_build_for_rpi_alias_appends_target_then_release() {
        let invocation = Toolchain::default()
            .build_command(&build_config("rpi", BuildMode::Release), Path::new("out/demo"));
        assert_eq!(
            invocation.args,
            vec!["build", "--target=arm-unknown-linux-gnueabihf", "--release"]
        );
        assert_eq!(
            invocation.to_string(),
            "cargo build --target=arm-unknown-linux-gnueabihf --release"
        );
        assert_eq!(invocation.current_dir, PathBuf::from("out/demo"));
    }

    #[test]
    fn default_debug_build_has_no_flags() {
        let invocation = Toolchain::default()
            .build_command(&build_config("default", BuildMode::Debug), Path::new("."));
        assert_eq!(invocation.to_string(), "cargo build");
    }

    #[test]
    fn explicit_triple_is_passed_through() {
        let invocation = Toolchain::new("cross").build_command(
            &build_config("aarch64-unknown-linux-gnu", BuildMode::Debug),
            Path::new("."),
        );
        assert_eq!(
            invocation.to_string(),
            "cross build --target=aarch64-unknown-linux-gnu"
        );
    }

    #[test]
    fn init_command_names_the_package() {
        let invocation = Toolchain::default().init_command("demo", Path::new("out/demo"));
        assert_eq!(
            invocation.to_string(),
            "cargo init --bin --vcs none --name demo"
        );
    }

    #[test]
    fn run_build_surfaces_exit_status() {
        let runner = RecordingRunner::with_hook(|invocation| {
            Err(ToolError::Failed {
                command: invocation.to_string(),
                code: Some(101),
            })
        });
        let result = run_build(
            &runner,
            &Toolchain::default(),
            &build_config("default", BuildMode::Release),
            Path::new("."),
        );
        assert!(matches!(
            result,
            Err(GeneratorError::Tool(ToolError::Failed {
                code: Some(101),
                ..
            }))
        ));
        assert_eq!(runner.commands(), vec!["cargo build --release"]);
    }
}
