//! Template store for generated projects.
//!
//! Every fragment and every file of the static support library is embedded into the
//! binary via [`include_str!`] in the [`embedded`] module, so a generator binary is
//! self-contained and never depends on its install location.
//!
//! Files under `templates/` and the constants in [`embedded`] must stay in sync; the
//! `include_str!` paths are checked at compile time.

pub mod embedded;

use std::path::Path;

/// Directory name of the support library inside a generated project.
pub const SUPPORT_LIBRARY_DIR: &str = "icasadi";

/// Location of the generated C header, relative to the support library root.
pub const CONFIG_HEADER_PATH: &str = "extern/icasadi_config.h";

/// Directory the differentiation backend writes its C sources into, relative to the
/// support library root.
pub const BACKEND_OUTPUT_DIR: &str = "extern";

/// Fixed fragments of the generated entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    Header,
    SolverState,
    MainPreamble,
    MainRequest,
    MainSolve,
}

impl Fragment {
    pub fn text(self) -> &'static str {
        match self {
            Fragment::Header => embedded::MAIN_HEADER,
            Fragment::SolverState => embedded::SOLVER_STATE,
            Fragment::MainPreamble => embedded::MAIN_PREAMBLE,
            Fragment::MainRequest => embedded::MAIN_REQUEST,
            Fragment::MainSolve => embedded::MAIN_SOLVE,
        }
    }
}

/// One file of the static support library.
#[derive(Debug, Clone, Copy)]
pub struct SupportFile {
    pub relative_path: &'static str,
    pub contents: &'static str,
}

impl SupportFile {
    pub fn path(&self) -> &Path {
        Path::new(self.relative_path)
    }
}

pub const SUPPORT_LIBRARY: &[SupportFile] = &[
    SupportFile {
        relative_path: "Cargo.toml",
        contents: embedded::ICASADI_CARGO_TOML,
    },
    SupportFile {
        relative_path: "build.rs",
        contents: embedded::ICASADI_BUILD_RS,
    },
    SupportFile {
        relative_path: "src/lib.rs",
        contents: embedded::ICASADI_LIB_RS,
    },
    SupportFile {
        relative_path: "extern/icasadi.c",
        contents: embedded::ICASADI_C,
    },
    SupportFile {
        relative_path: "extern/icasadi.h",
        contents: embedded::ICASADI_H,
    },
];
