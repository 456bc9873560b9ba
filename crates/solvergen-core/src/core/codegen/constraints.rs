use super::literal::fixed_literal;
use crate::core::models::problem::ConstraintDescriptor;
use thiserror::Error;
use tracing::warn;

pub const NO_CONSTRAINTS_SNIPPET: &str = "        let bounds = constraints::NoConstraints::new();\n";

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConstraintError {
    #[error(
        "Ball constraints with a non-empty center are not supported (center has {dimension} entries); omit `center` for a ball around the origin"
    )]
    UnsupportedBallCenter { dimension: usize },
}

/// Emits the statement that instantiates the bounds object for `descriptor`.
///
/// Unknown constraint kinds fall back to the unconstrained bounds object; the fallback
/// is logged at `warn` level so it never goes unnoticed.
pub fn synthesize(descriptor: &ConstraintDescriptor) -> Result<String, ConstraintError> {
    match descriptor {
        ConstraintDescriptor::NoConstraints => Ok(NO_CONSTRAINTS_SNIPPET.to_string()),
        ConstraintDescriptor::Ball { center, radius } => match center.as_deref() {
            None | Some([]) => Ok(format!(
                "        let bounds = constraints::Ball2::new(None, {});\n",
                fixed_literal(*radius)
            )),
            Some(center) => Err(ConstraintError::UnsupportedBallCenter {
                dimension: center.len(),
            }),
        },
        ConstraintDescriptor::Unsupported { .. } => {
            warn!(
                kind = descriptor.kind(),
                "Unsupported constraint kind; generating an unconstrained solver instead."
            );
            Ok(NO_CONSTRAINTS_SNIPPET.to_string())
        }
    }
}
