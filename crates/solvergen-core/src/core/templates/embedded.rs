pub const MAIN_HEADER: &str = include_str!("../../../templates/fragments/main_header.rs.tmpl");
pub const SOLVER_STATE: &str = include_str!("../../../templates/fragments/solver_state.rs.tmpl");
pub const MAIN_PREAMBLE: &str = include_str!("../../../templates/fragments/main_preamble.rs.tmpl");
pub const MAIN_REQUEST: &str = include_str!("../../../templates/fragments/main_request.rs.tmpl");
pub const MAIN_SOLVE: &str = include_str!("../../../templates/fragments/main_solve.rs.tmpl");

pub const ICASADI_CARGO_TOML: &str = include_str!("../../../templates/icasadi/Cargo.toml.tmpl");
pub const ICASADI_BUILD_RS: &str = include_str!("../../../templates/icasadi/build.rs.tmpl");
pub const ICASADI_LIB_RS: &str = include_str!("../../../templates/icasadi/src/lib.rs.tmpl");
pub const ICASADI_C: &str = include_str!("../../../templates/icasadi/extern/icasadi.c");
pub const ICASADI_H: &str = include_str!("../../../templates/icasadi/extern/icasadi.h");
