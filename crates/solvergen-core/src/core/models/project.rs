use phf::{Map, phf_map};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

static TARGET_ALIASES: Map<&'static str, &'static str> = phf_map! {
    "rpi" => "arm-unknown-linux-gnueabihf",
};

pub const DEFAULT_OPTIMIZER_PATH: &str = "../..";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("At least one author is required")]
    NoAuthors,
    #[error("Invalid build mode '{0}'. Expected 'debug' or 'release'.")]
    InvalidBuildMode(String),
    #[error("Target cannot be empty")]
    EmptyTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    #[default]
    Debug,
    Release,
}

impl FromStr for BuildMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildMode::Debug),
            "release" => Ok(BuildMode::Release),
            _ => Err(ConfigError::InvalidBuildMode(s.to_string())),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Debug => write!(f, "debug"),
            BuildMode::Release => write!(f, "release"),
        }
    }
}

/// Compilation target of the generated project.
///
/// `default` means the host toolchain; aliases such as `rpi` resolve to their
/// real target triple when parsed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    Default,
    Triple(String),
}

impl Target {
    pub fn triple(&self) -> Option<&str> {
        match self {
            Target::Default => None,
            Target::Triple(triple) => Some(triple),
        }
    }
}

impl FromStr for Target {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ConfigError::EmptyTarget);
        }
        if s == "default" {
            return Ok(Target::Default);
        }
        let triple = TARGET_ALIASES.get(s).copied().unwrap_or(s);
        Ok(Target::Triple(triple.to_string()))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Default => write!(f, "default"),
            Target::Triple(triple) => write!(f, "{}", triple),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub name: String,
    pub version: String,
    pub license: String,
    pub authors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub directory: PathBuf,
    pub target: Target,
    pub mode: BuildMode,
    pub optimizer_path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverSettings {
    pub tolerance: f64,
    pub lbfgs_memory: usize,
    pub max_iterations: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub bind_address: String,
    pub port: u16,
    pub buffer_size: usize,
}

/// Everything needed to lay out and build one generated project.
///
/// The value is never mutated once generation starts; every component borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    pub identity: Identity,
    pub build: BuildConfig,
    pub solver: SolverSettings,
    pub server: ServerSettings,
}

impl ProjectConfig {
    /// Root of the generated project: `<build directory>/<name>`.
    pub fn destination(&self) -> PathBuf {
        self.build.directory.join(&self.identity.name)
    }
}

#[derive(Default)]
pub struct ProjectConfigBuilder {
    name: Option<String>,
    version: Option<String>,
    license: Option<String>,
    authors: Option<Vec<String>>,
    directory: Option<PathBuf>,
    target: Option<Target>,
    mode: Option<BuildMode>,
    optimizer_path: Option<String>,
    tolerance: Option<f64>,
    lbfgs_memory: Option<usize>,
    max_iterations: Option<usize>,
    bind_address: Option<String>,
    port: Option<u16>,
    buffer_size: Option<usize>,
}

impl ProjectConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
    pub fn license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }
    pub fn authors(mut self, authors: Vec<String>) -> Self {
        self.authors = Some(authors);
        self
    }
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.directory = Some(directory);
        self
    }
    pub fn target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }
    pub fn mode(mut self, mode: BuildMode) -> Self {
        self.mode = Some(mode);
        self
    }
    pub fn optimizer_path(mut self, path: impl Into<String>) -> Self {
        self.optimizer_path = Some(path.into());
        self
    }
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
    pub fn lbfgs_memory(mut self, memory: usize) -> Self {
        self.lbfgs_memory = Some(memory);
        self
    }
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
    pub fn bind_address(mut self, address: impl Into<String>) -> Self {
        self.bind_address = Some(address.into());
        self
    }
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = Some(size);
        self
    }

    pub fn build(self) -> Result<ProjectConfig, ConfigError> {
        let authors = self
            .authors
            .ok_or(ConfigError::MissingParameter("authors"))?;
        if authors.is_empty() {
            return Err(ConfigError::NoAuthors);
        }
        let identity = Identity {
            name: self.name.ok_or(ConfigError::MissingParameter("name"))?,
            version: self.version.ok_or(ConfigError::MissingParameter("version"))?,
            license: self.license.ok_or(ConfigError::MissingParameter("license"))?,
            authors,
        };
        let build = BuildConfig {
            directory: self
                .directory
                .ok_or(ConfigError::MissingParameter("directory"))?,
            target: self.target.unwrap_or_default(),
            mode: self.mode.unwrap_or_default(),
            optimizer_path: self
                .optimizer_path
                .unwrap_or_else(|| DEFAULT_OPTIMIZER_PATH.to_string()),
        };
        let solver = SolverSettings {
            tolerance: self
                .tolerance
                .ok_or(ConfigError::MissingParameter("tolerance"))?,
            lbfgs_memory: self
                .lbfgs_memory
                .ok_or(ConfigError::MissingParameter("lbfgs_memory"))?,
            max_iterations: self
                .max_iterations
                .ok_or(ConfigError::MissingParameter("max_iterations"))?,
        };
        let server = ServerSettings {
            bind_address: self
                .bind_address
                .ok_or(ConfigError::MissingParameter("bind_address"))?,
            port: self.port.ok_or(ConfigError::MissingParameter("port"))?,
            buffer_size: self
                .buffer_size
                .ok_or(ConfigError::MissingParameter("buffer_size"))?,
        };
        Ok(ProjectConfig {
            identity,
            build,
            solver,
            server,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn demo_builder() -> ProjectConfigBuilder {
        ProjectConfigBuilder::new()
            .name("demo")
            .version("0.0.1")
            .license("MIT")
            .authors(vec!["Jane Doe".to_string()])
            .directory(PathBuf::from("build"))
            .tolerance(1e-5)
            .lbfgs_memory(10)
            .max_iterations(500)
            .bind_address("127.0.0.1")
            .port(8080)
            .buffer_size(4096)
    }

    #[test]
    fn builder_fills_defaults_for_optional_fields() {
        let config = demo_builder().build().unwrap();
        assert_eq!(config.build.target, Target::Default);
        assert_eq!(config.build.mode, BuildMode::Debug);
        assert_eq!(config.build.optimizer_path, DEFAULT_OPTIMIZER_PATH);
        assert_eq!(config.destination(), PathBuf::from("build").join("demo"));
    }

    #[test]
    fn builder_reports_missing_parameter() {
        let result = ProjectConfigBuilder::new()
            .name("demo")
            .authors(vec!["Jane Doe".to_string()])
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("version")));
    }

    #[test]
    fn builder_rejects_empty_author_list() {
        let result = demo_builder().authors(vec![]).build();
        assert_eq!(result, Err(ConfigError::NoAuthors));
    }

    #[test]
    fn target_parses_default_alias_and_triple() {
        assert_eq!("default".parse::<Target>().unwrap(), Target::Default);
        assert_eq!(
            "rpi".parse::<Target>().unwrap(),
            Target::Triple("arm-unknown-linux-gnueabihf".to_string())
        );
        assert_eq!(
            "x86_64-unknown-linux-musl".parse::<Target>().unwrap().triple(),
            Some("x86_64-unknown-linux-musl")
        );
        assert_eq!("  ".parse::<Target>(), Err(ConfigError::EmptyTarget));
    }

    #[test]
    fn build_mode_parses_case_insensitively() {
        assert_eq!("Release".parse::<BuildMode>().unwrap(), BuildMode::Release);
        assert_eq!("debug".parse::<BuildMode>().unwrap(), BuildMode::Debug);
        assert!(matches!(
            "fast".parse::<BuildMode>(),
            Err(ConfigError::InvalidBuildMode(_))
        ));
        assert_eq!(BuildMode::Release.to_string(), "release");
    }
}
