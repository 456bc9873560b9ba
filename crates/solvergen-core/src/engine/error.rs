use crate::core::codegen::constraints::ConstraintError;
use crate::engine::tools::runner::ToolError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid constraints: {0}")]
    Constraint(#[from] ConstraintError),

    #[error("Failed to render manifest: {0}")]
    Manifest(#[from] toml::ser::Error),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("Differentiation backend failed: {0}")]
    Backend(String),
}

impl GeneratorError {
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| GeneratorError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
