use super::build::Toolchain;
use super::runner::{CommandRunner, Invocation};
use crate::core::models::problem::{
    COST_FUNCTION_NAME, CostExpression, FunctionHandles, GRADIENT_FUNCTION_NAME, ProblemDimensions,
    ProblemSpec,
};
use crate::core::models::project::BuildConfig;
use crate::core::templates::{BACKEND_OUTPUT_DIR, SUPPORT_LIBRARY_DIR};
use crate::engine::error::{GeneratorError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// C sources the backend must leave in the support library's `extern` directory.
pub const BACKEND_SOURCES: [&str; 2] = ["auto_casadi_cost.c", "auto_casadi_grad.c"];

/// What the differentiation backend is asked to produce.
#[derive(Debug, Clone, Serialize)]
pub struct BackendRequest<'a> {
    pub decision_variables: &'a [String],
    pub parameters: &'a [String],
    pub cost: &'a CostExpression,
    pub penalty_constraints: usize,
    pub cost_function_name: &'static str,
    pub gradient_function_name: &'static str,
    pub output_directory: &'static str,
    pub output_files: [&'static str; 2],
    #[serde(skip)]
    pub support_library: PathBuf,
}

impl<'a> BackendRequest<'a> {
    pub fn new(problem: &'a ProblemSpec, destination: &Path) -> Self {
        Self {
            decision_variables: &problem.decision_variables,
            parameters: &problem.parameters,
            cost: &problem.cost,
            penalty_constraints: problem.penalty_constraints.unwrap_or(0),
            cost_function_name: COST_FUNCTION_NAME,
            gradient_function_name: GRADIENT_FUNCTION_NAME,
            output_directory: BACKEND_OUTPUT_DIR,
            output_files: BACKEND_SOURCES,
            support_library: destination.join(SUPPORT_LIBRARY_DIR),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.support_library.join(self.output_directory)
    }
}

/// Turns a symbolic cost into C evaluation code for the cost and its gradient.
pub trait DifferentiationBackend {
    fn emit(
        &self,
        request: &BackendRequest<'_>,
        runner: &dyn CommandRunner,
    ) -> Result<FunctionHandles>;
}

/// A backend implemented by an external program.
///
/// The program runs inside the support library directory and receives the request as
/// JSON on its standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalBackend {
    pub program: String,
    pub args: Vec<String>,
}

impl ExternalBackend {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl DifferentiationBackend for ExternalBackend {
    fn emit(
        &self,
        request: &BackendRequest<'_>,
        runner: &dyn CommandRunner,
    ) -> Result<FunctionHandles> {
        let payload = serde_json::to_vec_pretty(request)
            .map_err(|e| GeneratorError::Backend(format!("cannot encode request: {}", e)))?;
        let invocation = Invocation::new(&self.program, &request.support_library)
            .args(self.args.iter().cloned())
            .stdin(payload);
        info!(command = %invocation, "Invoking differentiation backend.");
        runner.run(&invocation)?;
        Ok(FunctionHandles::default())
    }
}

/// Result of the differentiation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Differentiated {
    pub handles: FunctionHandles,
    pub dimensions: ProblemDimensions,
}

/// Emits cost/gradient code with `backend` and compiles the support library.
///
/// The returned dimensions are taken from the same vectors sent to the backend.
pub fn differentiate(
    backend: &dyn DifferentiationBackend,
    runner: &dyn CommandRunner,
    toolchain: &Toolchain,
    build: &BuildConfig,
    problem: &ProblemSpec,
    destination: &Path,
) -> Result<Differentiated> {
    let request = BackendRequest::new(problem, destination);
    let output_dir = request.output_path();
    std::fs::create_dir_all(&output_dir).map_err(GeneratorError::io(&output_dir))?;

    let handles = backend.emit(&request, runner)?;

    for source in BACKEND_SOURCES {
        let path = output_dir.join(source);
        if !path.is_file() {
            return Err(GeneratorError::Backend(format!(
                "expected output file {} was not produced",
                path.display()
            )));
        }
    }
    debug!(
        cost = handles.cost.as_str(),
        gradient = handles.gradient.as_str(),
        "Backend produced cost and gradient sources."
    );

    let build_command = toolchain.build_command(build, &request.support_library);
    info!(command = %build_command, "Compiling support library.");
    runner.run(&build_command)?;

    Ok(Differentiated {
        handles,
        dimensions: problem.dimensions(),
    })
}
