use solvergen::core::models::problem::ProblemSpec;
use solvergen::core::models::project::ProjectConfig;
use solvergen::engine::tools::backend::ExternalBackend;
use solvergen::engine::tools::build::Toolchain;

pub struct AppConfig {
    pub project: ProjectConfig,
    pub problem: ProblemSpec,
    /// Absent when the problem file has no `[backend]` table; only `generate` needs it.
    pub backend: Option<ExternalBackend>,
    pub toolchain: Toolchain,
}
