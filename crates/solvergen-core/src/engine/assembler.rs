use super::error::{GeneratorError, Result};
use crate::core::codegen::constants::{emit_c_header, emit_constants};
use crate::core::codegen::constraints::synthesize;
use crate::core::codegen::manifest::{MANIFEST_FILE_NAME, generate_manifest};
use crate::core::codegen::network::emit_network_bootstrap;
use crate::core::models::problem::{ConstraintDescriptor, ProblemDimensions};
use crate::core::models::project::ProjectConfig;
use crate::core::templates::{CONFIG_HEADER_PATH, Fragment, SUPPORT_LIBRARY_DIR};
use std::borrow::Cow;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub const ENTRY_POINT_PATH: &str = "src/main.rs";

/// One piece of the generated entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Header,
    Constants,
    SolverState,
    MainPreamble,
    NetworkBootstrap,
    MainRequest,
    Bounds,
    MainSolve,
}

/// Order in which sections are written to the entry point.
pub const ENTRY_POINT_LAYOUT: [Section; 8] = [
    Section::Header,
    Section::Constants,
    Section::SolverState,
    Section::MainPreamble,
    Section::NetworkBootstrap,
    Section::MainRequest,
    Section::Bounds,
    Section::MainSolve,
];

struct SectionInputs<'a> {
    config: &'a ProjectConfig,
    dimensions: &'a ProblemDimensions,
    constraints: &'a ConstraintDescriptor,
}

impl Section {
    fn render(self, inputs: &SectionInputs<'_>) -> Result<Cow<'static, str>> {
        let text = match self {
            Section::Header => Cow::Borrowed(Fragment::Header.text()),
            Section::Constants => Cow::Owned(emit_constants(inputs.config, inputs.dimensions)),
            Section::SolverState => Cow::Borrowed(Fragment::SolverState.text()),
            Section::MainPreamble => Cow::Borrowed(Fragment::MainPreamble.text()),
            Section::NetworkBootstrap => {
                Cow::Owned(emit_network_bootstrap(&inputs.config.server))
            }
            Section::MainRequest => Cow::Borrowed(Fragment::MainRequest.text()),
            Section::Bounds => Cow::Owned(synthesize(inputs.constraints)?),
            Section::MainSolve => Cow::Borrowed(Fragment::MainSolve.text()),
        };
        Ok(text)
    }
}

fn write_sections(
    out: &mut impl Write,
    inputs: &SectionInputs<'_>,
    path: &Path,
) -> Result<()> {
    for section in ENTRY_POINT_LAYOUT {
        let text = section.render(inputs)?;
        out.write_all(text.as_bytes())
            .map_err(GeneratorError::io(path))?;
        debug!(section = ?section, bytes = text.len(), "Wrote entry-point section.");
    }
    out.flush().map_err(GeneratorError::io(path))
}

/// Renders the complete entry-point source in memory.
pub fn render_entry_point(
    config: &ProjectConfig,
    dimensions: &ProblemDimensions,
    constraints: &ConstraintDescriptor,
) -> Result<String> {
    let inputs = SectionInputs {
        config,
        dimensions,
        constraints,
    };
    let mut source = String::new();
    for section in ENTRY_POINT_LAYOUT {
        source.push_str(&section.render(&inputs)?);
    }
    Ok(source)
}

/// Writes `src/main.rs` below `destination`.
///
/// The sections go to a temporary file next to the target, which replaces the target
/// only after the last section was written. On error the temporary file is removed
/// and an existing `main.rs` is left as it was.
pub fn assemble(
    destination: &Path,
    config: &ProjectConfig,
    dimensions: &ProblemDimensions,
    constraints: &ConstraintDescriptor,
) -> Result<PathBuf> {
    let target = destination.join(ENTRY_POINT_PATH);
    let src_dir = target
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| destination.to_path_buf());
    fs::create_dir_all(&src_dir).map_err(GeneratorError::io(&src_dir))?;

    let mut staged = NamedTempFile::new_in(&src_dir).map_err(GeneratorError::io(&src_dir))?;
    {
        let inputs = SectionInputs {
            config,
            dimensions,
            constraints,
        };
        let mut writer = BufWriter::new(staged.as_file_mut());
        write_sections(&mut writer, &inputs, &target)?;
    }
    if let Some(permissions) = entry_point_permissions(&target) {
        staged
            .as_file()
            .set_permissions(permissions)
            .map_err(GeneratorError::io(&target))?;
    }
    staged
        .persist(&target)
        .map_err(|e| GeneratorError::io(&target)(e.error))?;

    info!(file = %target.display(), "Entry point assembled.");
    Ok(target)
}

/// Mode for the entry point: whatever the file it replaces had, otherwise the usual
/// `0o644` of a freshly created source file.
fn entry_point_permissions(target: &Path) -> Option<fs::Permissions> {
    match fs::metadata(target) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => default_source_permissions(),
    }
}

#[cfg(unix)]
fn default_source_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_source_permissions() -> Option<fs::Permissions> {
    None
}

/// Writes the package manifest to `destination/Cargo.toml`.
pub fn write_manifest(destination: &Path, config: &ProjectConfig) -> Result<PathBuf> {
    let path = destination.join(MANIFEST_FILE_NAME);
    let manifest = generate_manifest(config)?;
    fs::write(&path, manifest).map_err(GeneratorError::io(&path))?;
    info!(file = %path.display(), "Manifest written.");
    Ok(path)
}

/// Writes the C configuration header into the support library.
pub fn write_c_header(
    destination: &Path,
    dimensions: &ProblemDimensions,
    penalty_constraints: Option<usize>,
) -> Result<PathBuf> {
    let path = destination.join(SUPPORT_LIBRARY_DIR).join(CONFIG_HEADER_PATH);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(GeneratorError::io(parent))?;
    }
    fs::write(&path, emit_c_header(dimensions, penalty_constraints))
        .map_err(GeneratorError::io(&path))?;
    info!(file = %path.display(), "C header written.");
    Ok(path)
}
