pub mod problem;
pub mod project;
