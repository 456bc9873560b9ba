use crate::cli::{Artifact, PreviewArgs};
use crate::config::{AppConfig, build_config};
use crate::error::Result;
use solvergen::core::codegen::constants::emit_c_header;
use solvergen::core::codegen::manifest::generate_manifest;
use solvergen::engine::assembler::render_entry_point;
use solvergen::engine::error::GeneratorError;
use std::io::Write;
use tracing::info;

pub fn run(args: PreviewArgs) -> Result<()> {
    let app = build_config(&args.config)?;
    info!(artifact = ?args.artifact, "Rendering preview.");
    let text = render(args.artifact, &app)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

pub fn render(artifact: Artifact, app: &AppConfig) -> Result<String> {
    let dimensions = app.problem.dimensions();
    let text = match artifact {
        Artifact::Main => {
            render_entry_point(&app.project, &dimensions, &app.problem.constraints)?
        }
        Artifact::Manifest => generate_manifest(&app.project).map_err(GeneratorError::from)?,
        Artifact::Header => emit_c_header(&dimensions, app.problem.penalty_constraints),
    };
    Ok(text)
}
