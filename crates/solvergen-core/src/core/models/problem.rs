use serde::Serialize;

pub const COST_FUNCTION_NAME: &str = "phi";
pub const GRADIENT_FUNCTION_NAME: &str = "grad_phi";
pub const PENALTY_CONSTRAINTS_NAME: &str = "constraints_as_penalty";

/// Feasible set the generated solver projects onto.
///
/// `Unsupported` carries constraint kinds this generator does not know yet. They are
/// accepted and emitted as the unconstrained bounds object.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ConstraintDescriptor {
    #[default]
    NoConstraints,
    Ball {
        center: Option<Vec<f64>>,
        radius: f64,
    },
    Unsupported {
        kind: String,
    },
}

impl ConstraintDescriptor {
    pub fn kind(&self) -> &str {
        match self {
            ConstraintDescriptor::NoConstraints => "none",
            ConstraintDescriptor::Ball { .. } => "ball",
            ConstraintDescriptor::Unsupported { kind } => kind,
        }
    }
}

/// Symbolic cost expression handed to the differentiation backend untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CostExpression(pub String);

#[derive(Debug, Clone, PartialEq)]
pub struct ProblemSpec {
    pub decision_variables: Vec<String>,
    pub parameters: Vec<String>,
    pub cost: CostExpression,
    pub constraints: ConstraintDescriptor,
    pub penalty_constraints: Option<usize>,
}

impl ProblemSpec {
    /// Dimensions as seen by the differentiation backend.
    ///
    /// Taken from the very vectors sent to the backend, so the Rust constants and the
    /// C header can never disagree with the generated cost code.
    pub fn dimensions(&self) -> ProblemDimensions {
        ProblemDimensions {
            nu: self.decision_variables.len(),
            np: self.parameters.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemDimensions {
    pub nu: usize,
    pub np: usize,
}

/// Names of the cost and gradient symbols emitted by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionHandles {
    pub cost: String,
    pub gradient: String,
}

impl Default for FunctionHandles {
    fn default() -> Self {
        Self {
            cost: COST_FUNCTION_NAME.to_string(),
            gradient: GRADIENT_FUNCTION_NAME.to_string(),
        }
    }
}
