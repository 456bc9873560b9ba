use crate::error::{CliError, Result};
use serde::Deserialize;
use solvergen::core::models::problem::ConstraintDescriptor;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileProjectConfig {
    pub name: Option<String>,
    pub version: Option<String>,
    pub license: Option<String>,
    pub authors: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileBuildConfig {
    pub directory: Option<PathBuf>,
    pub target: Option<String>,
    pub mode: Option<String>,
    pub optimizer_path: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSolverConfig {
    pub tolerance: Option<f64>,
    pub lbfgs_memory: Option<usize>,
    pub max_iterations: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileServerConfig {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub buffer_size: Option<usize>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConstraintConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub center: Option<Vec<f64>>,
    pub radius: Option<f64>,
}

impl FileConstraintConfig {
    pub fn into_descriptor(self) -> Result<ConstraintDescriptor> {
        match self.kind.as_str() {
            "none" => Ok(ConstraintDescriptor::NoConstraints),
            "ball" => {
                let radius = self.radius.ok_or_else(|| {
                    CliError::Config(
                        "`problem.constraints` of type 'ball' requires `radius`".to_string(),
                    )
                })?;
                Ok(ConstraintDescriptor::Ball {
                    center: self.center,
                    radius,
                })
            }
            _ => Ok(ConstraintDescriptor::Unsupported { kind: self.kind }),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileProblemConfig {
    pub decision_variables: Option<Vec<String>>,
    #[serde(default)]
    pub parameters: Vec<String>,
    pub cost: Option<String>,
    pub penalty_constraints: Option<usize>,
    pub constraints: Option<FileConstraintConfig>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileBackendConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileToolchainConfig {
    pub cargo: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub project: Option<FileProjectConfig>,
    pub build: Option<FileBuildConfig>,
    pub solver: Option<FileSolverConfig>,
    pub server: Option<FileServerConfig>,
    pub problem: Option<FileProblemConfig>,
    pub backend: Option<FileBackendConfig>,
    pub toolchain: Option<FileToolchainConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading problem description from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
