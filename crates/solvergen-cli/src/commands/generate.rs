use crate::cli::GenerateArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use solvergen::engine::progress::ProgressReporter;
use solvergen::engine::scaffold::ScaffoldOutcome;
use solvergen::engine::tools::runner::SystemRunner;
use solvergen::workflows::generate::{self, GenerateOptions, Toolset};
use tracing::info;

pub fn run(args: GenerateArgs, progress_handler: &CliProgressHandler) -> Result<()> {
    info!("Resolving configuration from {:?}", &args.config.config);
    let app = build_config(&args.config)?;

    let backend = app.backend.as_ref().ok_or_else(|| {
        CliError::Config(
            "`generate` requires a `[backend]` section naming the differentiation program."
                .to_string(),
        )
    })?;

    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let runner = SystemRunner;
    let tools = Toolset {
        backend,
        runner: &runner,
        toolchain: &app.toolchain,
    };
    let options = GenerateOptions {
        skip_build: args.skip_build,
    };

    println!(
        "Generating solver '{}' into {}...",
        app.project.identity.name,
        app.project.destination().display()
    );
    info!("Invoking the core generation workflow...");

    let result = generate::run(&app.project, &app.problem, &tools, options, &reporter);
    progress_handler.finish();
    let report = result?;

    if report.scaffold == ScaffoldOutcome::AlreadyPresent {
        println!("  Reused existing project directory.");
    }
    println!(
        "✓ Solver with NU = {}, NP = {} written to: {}",
        report.dimensions.nu,
        report.dimensions.np,
        report.entry_point.display()
    );
    if report.built {
        println!(
            "✓ Project built in {} mode for target '{}'.",
            app.project.build.mode, app.project.build.target
        );
    } else {
        println!("  Build skipped; run `cargo build` in the project directory when ready.");
    }

    Ok(())
}
