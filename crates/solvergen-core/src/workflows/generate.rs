use crate::core::models::problem::{FunctionHandles, ProblemDimensions, ProblemSpec};
use crate::core::models::project::ProjectConfig;
use crate::engine::assembler::{assemble, write_c_header, write_manifest};
use crate::engine::error::Result;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::scaffold::{ScaffoldOutcome, scaffold};
use crate::engine::tools::backend::{DifferentiationBackend, differentiate};
use crate::engine::tools::build::{Toolchain, run_build};
use crate::engine::tools::runner::CommandRunner;
use std::path::PathBuf;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Stop after the entry point is assembled; the final project build is not run.
    pub skip_build: bool,
}

/// The external collaborators a generation run drives.
pub struct Toolset<'a> {
    pub backend: &'a dyn DifferentiationBackend,
    pub runner: &'a dyn CommandRunner,
    pub toolchain: &'a Toolchain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub destination: PathBuf,
    pub scaffold: ScaffoldOutcome,
    pub handles: FunctionHandles,
    pub dimensions: ProblemDimensions,
    pub entry_point: PathBuf,
    pub built: bool,
}

#[instrument(skip_all, name = "generate_workflow", fields(project = %config.identity.name))]
pub fn run(
    config: &ProjectConfig,
    problem: &ProblemSpec,
    tools: &Toolset<'_>,
    options: GenerateOptions,
    reporter: &ProgressReporter,
) -> Result<GenerationReport> {
    let destination = config.destination();
    info!(destination = %destination.display(), "Starting project generation.");

    let outcome = reporter.phase("Scaffolding", || {
        scaffold(config, tools.runner, tools.toolchain)
    })?;
    if outcome == ScaffoldOutcome::AlreadyPresent {
        reporter.report(Progress::Message(format!(
            "Reusing existing project at {}",
            destination.display()
        )));
    }

    reporter.phase("Writing manifest", || write_manifest(&destination, config))?;

    reporter.phase("Writing C header", || {
        write_c_header(
            &destination,
            &problem.dimensions(),
            problem.penalty_constraints,
        )
    })?;

    let differentiated = reporter.phase("Differentiating cost", || {
        differentiate(
            tools.backend,
            tools.runner,
            tools.toolchain,
            &config.build,
            problem,
            &destination,
        )
    })?;

    let entry_point = reporter.phase("Assembling entry point", || {
        assemble(
            &destination,
            config,
            &differentiated.dimensions,
            &problem.constraints,
        )
    })?;

    let built = if options.skip_build {
        info!("Skipping final build as requested.");
        false
    } else {
        reporter.phase("Building project", || {
            run_build(tools.runner, tools.toolchain, &config.build, &destination)
        })?;
        true
    };

    info!(
        nu = differentiated.dimensions.nu,
        np = differentiated.dimensions.np,
        built,
        "Project generation finished."
    );

    Ok(GenerationReport {
        destination,
        scaffold: outcome,
        handles: differentiated.handles,
        dimensions: differentiated.dimensions,
        entry_point,
        built,
    })
}
