use super::literal::float_literal;
use crate::core::models::problem::{
    COST_FUNCTION_NAME, GRADIENT_FUNCTION_NAME, PENALTY_CONSTRAINTS_NAME, ProblemDimensions,
};
use crate::core::models::project::ProjectConfig;

/// Emits the typed constant declarations of the generated entry point.
pub fn emit_constants(config: &ProjectConfig, dimensions: &ProblemDimensions) -> String {
    format!(
        "const TOLERANCE: f64 = {tolerance};
const LBFGS_MEMORY: usize = {memory};
const MAX_ITERS: usize = {max_iters};
const NU: usize = {nu};
const NP: usize = {np};
const COMMUNICATION_BUFFER: usize = {buffer};
",
        tolerance = float_literal(config.solver.tolerance),
        memory = config.solver.lbfgs_memory,
        max_iters = config.solver.max_iterations,
        nu = dimensions.nu,
        np = dimensions.np,
        buffer = config.server.buffer_size,
    )
}

/// Emits `icasadi_config.h`, the C-side view of the problem dimensions and of the
/// symbol names produced by the differentiation backend.
pub fn emit_c_header(dimensions: &ProblemDimensions, penalty_constraints: Option<usize>) -> String {
    format!(
        "/*
 * Generated by solvergen; do not edit.
 */
#ifndef ICASADI_CONFIG_HEADER_SENTINEL
#define ICASADI_CONFIG_HEADER_SENTINEL

/* Number of decision variables */
#define CASADI_NU {nu}

/* Number of parameters */
#define CASADI_NP {np}

/* Number of constraints treated with the penalty method */
#define CASADI_NUM_CONSTRAINTS_TYPE_PENALTY {ncp}

/* Name of the cost function */
#define CASADI_COST_NAME {cost}

/* Name of the gradient of the cost function */
#define CASADI_GRAD_NAME {grad}

/* Name of the penalty constraints function */
#define CASADI_CONSTRAINTS_AS_PENALTY_NAME {penalty}

#endif
",
        nu = dimensions.nu,
        np = dimensions.np,
        ncp = penalty_constraints.unwrap_or(0),
        cost = COST_FUNCTION_NAME,
        grad = GRADIENT_FUNCTION_NAME,
        penalty = PENALTY_CONSTRAINTS_NAME,
    )
}
