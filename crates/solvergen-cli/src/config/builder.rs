use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::ConfigArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use solvergen::core::models::problem::{ConstraintDescriptor, CostExpression, ProblemSpec};
use solvergen::core::models::project::{BuildMode, ProjectConfigBuilder, Target};
use solvergen::engine::tools::backend::ExternalBackend;
use solvergen::engine::tools::build::Toolchain;
use std::path::PathBuf;
use tracing::debug;

pub fn build_config(args: &ConfigArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = FileConfig::from_file(&args.config)?;
    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let project_file = file_config.project.take().unwrap_or_default();
    let build_file = file_config.build.take().unwrap_or_default();
    let solver_file = file_config.solver.take().unwrap_or_default();
    let server_file = file_config.server.take().unwrap_or_default();

    if args.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(CliError::Argument("--name cannot be empty".to_string()));
    }
    let name = args.name.clone().or(project_file.name).ok_or_else(|| {
        CliError::Config(
            "A project name is required either as `project.name` in the problem file or via --name."
                .to_string(),
        )
    })?;

    let mode = match (args.build_mode.release, args.build_mode.debug) {
        (true, _) => BuildMode::Release,
        (_, true) => BuildMode::Debug,
        _ => match build_file.mode.as_deref() {
            Some(mode) => mode.parse::<BuildMode>().map_err(config_error)?,
            None => BuildMode::default(),
        },
    };

    let target = match args.target.as_deref().or(build_file.target.as_deref()) {
        Some(target) => target.parse::<Target>().map_err(config_error)?,
        None => Target::default(),
    };

    let directory = args
        .output
        .clone()
        .or(build_file.directory)
        .unwrap_or_else(|| PathBuf::from(&defaults.directory));

    let mut builder = ProjectConfigBuilder::new()
        .name(name)
        .version(project_file.version.unwrap_or(defaults.version))
        .license(project_file.license.unwrap_or(defaults.license))
        .authors(project_file.authors.unwrap_or_default())
        .directory(directory)
        .target(target)
        .mode(mode)
        .tolerance(solver_file.tolerance.unwrap_or(defaults.tolerance))
        .lbfgs_memory(solver_file.lbfgs_memory.unwrap_or(defaults.lbfgs_memory))
        .max_iterations(solver_file.max_iterations.unwrap_or(defaults.max_iterations))
        .bind_address(server_file.bind_address.unwrap_or(defaults.bind_address))
        .port(server_file.port.unwrap_or(defaults.port))
        .buffer_size(server_file.buffer_size.unwrap_or(defaults.buffer_size));
    if let Some(path) = build_file.optimizer_path {
        builder = builder.optimizer_path(path);
    }
    let project = builder.build().map_err(config_error)?;

    let problem = build_problem(&mut file_config)?;

    let backend = file_config
        .backend
        .take()
        .map(|b| ExternalBackend::new(b.program, b.args));
    let toolchain = file_config
        .toolchain
        .take()
        .and_then(|t| t.cargo)
        .map(Toolchain::new)
        .unwrap_or_default();

    debug!(
        project = %project.identity.name,
        destination = %project.destination().display(),
        target = %project.build.target,
        mode = %project.build.mode,
        "Configuration resolved."
    );

    Ok(AppConfig {
        project,
        problem,
        backend,
        toolchain,
    })
}

fn build_problem(file_config: &mut FileConfig) -> Result<ProblemSpec> {
    let problem_file = file_config.problem.take().ok_or_else(|| {
        CliError::Config("The problem file requires a `[problem]` section.".to_string())
    })?;

    let decision_variables = problem_file
        .decision_variables
        .filter(|vars| !vars.is_empty())
        .ok_or_else(|| {
            CliError::Config("`problem.decision-variables` must list at least one name.".to_string())
        })?;
    let cost = problem_file
        .cost
        .ok_or_else(|| CliError::Config("`problem.cost` is required.".to_string()))?;
    let constraints = match problem_file.constraints {
        Some(constraints) => constraints.into_descriptor()?,
        None => ConstraintDescriptor::NoConstraints,
    };

    Ok(ProblemSpec {
        decision_variables,
        parameters: problem_file.parameters,
        cost: CostExpression(cost),
        constraints,
        penalty_constraints: problem_file.penalty_constraints,
    })
}

fn config_error(e: impl std::fmt::Display) -> CliError {
    CliError::Config(e.to_string())
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let (key, value_str) = parser::parse_key_value(kv_pair).map_err(config_error)?;

        match key {
            "solver.tolerance" => {
                config.solver.get_or_insert_with(Default::default).tolerance =
                    Some(parse(key, value_str, "float")?);
            }
            "solver.lbfgs-memory" => {
                config.solver.get_or_insert_with(Default::default).lbfgs_memory =
                    Some(parse(key, value_str, "integer")?);
            }
            "solver.max-iterations" => {
                config
                    .solver
                    .get_or_insert_with(Default::default)
                    .max_iterations = Some(parse(key, value_str, "integer")?);
            }
            "server.bind-address" => {
                config
                    .server
                    .get_or_insert_with(Default::default)
                    .bind_address = Some(value_str.to_string());
            }
            "server.port" => {
                config.server.get_or_insert_with(Default::default).port =
                    Some(parse(key, value_str, "port")?);
            }
            "server.buffer-size" => {
                config.server.get_or_insert_with(Default::default).buffer_size =
                    Some(parse(key, value_str, "integer")?);
            }
            "build.mode" => {
                config.build.get_or_insert_with(Default::default).mode =
                    Some(value_str.to_string());
            }
            "build.target" => {
                config.build.get_or_insert_with(Default::default).target =
                    Some(value_str.to_string());
            }
            "build.directory" => {
                config.build.get_or_insert_with(Default::default).directory =
                    Some(PathBuf::from(value_str));
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

fn parse<T: std::str::FromStr>(key: &str, value: &str, expected: &'static str) -> Result<T> {
    parser::parse_value(key, value, expected).map_err(config_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::BuildModeFlags;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const PROBLEM: &str = r#"
        [project]
        name = "demo"
        authors = ["Jane Doe"]

        [problem]
        decision-variables = ["u0", "u1", "u2"]
        parameters = ["p"]
        cost = "p * (u0 - 1)^2 + u1^2 + u2^2"
    "#;

    fn args_for(path: &Path) -> ConfigArgs {
        ConfigArgs {
            config: path.to_path_buf(),
            ..Default::default()
        }
    }

    fn write_problem(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("problem.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn minimal_file_is_completed_with_defaults() {
        let dir = tempdir().unwrap();
        let path = write_problem(dir.path(), PROBLEM);

        let app = build_config(&args_for(&path)).expect("build ok");
        let defaults = DefaultsConfig::default();

        assert_eq!(app.project.identity.version, defaults.version);
        assert_eq!(app.project.identity.license, defaults.license);
        assert_eq!(app.project.destination(), PathBuf::from("build").join("demo"));
        assert_eq!(app.project.build.target, Target::Default);
        assert_eq!(app.project.build.mode, BuildMode::Debug);
        assert_eq!(app.project.build.optimizer_path, "../..");
        assert_eq!(app.project.solver.tolerance, defaults.tolerance);
        assert_eq!(app.project.server.port, defaults.port);
        assert_eq!(app.problem.dimensions().nu, 3);
        assert_eq!(app.problem.constraints, ConstraintDescriptor::NoConstraints);
        assert!(app.backend.is_none());
        assert_eq!(app.toolchain, Toolchain::default());
    }

    #[test]
    fn file_values_are_used() {
        let dir = tempdir().unwrap();
        let contents = format!(
            r#"{PROBLEM}
            [build]
            directory = "out"
            target = "rpi"
            mode = "release"

            [solver]
            tolerance = 1e-6
            max-iterations = 50

            [server]
            bind-address = "0.0.0.0"
            buffer-size = 1024

            [backend]
            program = "solvergen-casadi"

            [toolchain]
            cargo = "cross"
            "#
        );
        let path = write_problem(dir.path(), &contents);

        let app = build_config(&args_for(&path)).expect("build ok");

        assert_eq!(app.project.destination(), PathBuf::from("out").join("demo"));
        assert_eq!(
            app.project.build.target.triple(),
            Some("arm-unknown-linux-gnueabihf")
        );
        assert_eq!(app.project.build.mode, BuildMode::Release);
        assert_eq!(app.project.solver.tolerance, 1e-6);
        assert_eq!(app.project.solver.max_iterations, 50);
        assert_eq!(app.project.server.bind_address, "0.0.0.0");
        assert_eq!(app.project.server.buffer_size, 1024);
        assert_eq!(
            app.backend,
            Some(ExternalBackend::new("solvergen-casadi", vec![]))
        );
        assert_eq!(app.toolchain.cargo, "cross");
    }

    #[test]
    fn cli_overrides_file_values() {
        let dir = tempdir().unwrap();
        let contents = format!(
            r#"{PROBLEM}
            [build]
            directory = "out"
            mode = "release"
            target = "rpi"
            "#
        );
        let path = write_problem(dir.path(), &contents);
        let mut args = args_for(&path);
        args.output = Some(PathBuf::from("elsewhere"));
        args.name = Some("renamed".to_string());
        args.target = Some("default".to_string());
        args.build_mode = BuildModeFlags {
            release: false,
            debug: true,
        };

        let app = build_config(&args).expect("build ok");

        assert_eq!(
            app.project.destination(),
            PathBuf::from("elsewhere").join("renamed")
        );
        assert_eq!(app.project.build.mode, BuildMode::Debug);
        assert_eq!(app.project.build.target, Target::Default);
    }

    #[test]
    fn set_values_override() {
        let dir = tempdir().unwrap();
        let path = write_problem(dir.path(), PROBLEM);
        let mut args = args_for(&path);
        args.set_values = vec![
            "solver.tolerance=0.001".to_string(),
            "solver.lbfgs-memory=7".to_string(),
            "solver.max-iterations=123".to_string(),
            "server.bind-address=::1".to_string(),
            "server.port=9000".to_string(),
            "server.buffer-size=2048".to_string(),
            "build.mode=release".to_string(),
            "build.target=rpi".to_string(),
            "build.directory=gen".to_string(),
        ];

        let app = build_config(&args).expect("build ok");
        let project = app.project;

        assert!((project.solver.tolerance - 0.001).abs() < 1e-12);
        assert_eq!(project.solver.lbfgs_memory, 7);
        assert_eq!(project.solver.max_iterations, 123);
        assert_eq!(project.server.bind_address, "::1");
        assert_eq!(project.server.port, 9000);
        assert_eq!(project.server.buffer_size, 2048);
        assert_eq!(project.build.mode, BuildMode::Release);
        assert_eq!(
            project.build.target,
            Target::Triple("arm-unknown-linux-gnueabihf".into())
        );
        assert_eq!(project.destination(), PathBuf::from("gen").join("demo"));
    }

    #[test]
    fn unsupported_set_key_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write_problem(dir.path(), PROBLEM);
        let mut args = args_for(&path);
        args.set_values = vec!["solver.speed=fast".to_string()];

        let err = build_config(&args).err().unwrap();
        assert_eq!(
            err.to_string(),
            "Configuration error: Unsupported configuration key for --set: 'solver.speed'"
        );
    }

    #[test]
    fn malformed_set_value_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write_problem(dir.path(), PROBLEM);
        let mut args = args_for(&path);
        args.set_values = vec!["server.port=eighty".to_string()];

        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn missing_authors_and_name_are_config_errors() {
        let dir = tempdir().unwrap();
        let path = write_problem(
            dir.path(),
            r#"
            [project]
            name = "demo"
            authors = []

            [problem]
            decision-variables = ["u"]
            cost = "u^2"
            "#,
        );
        let err = build_config(&args_for(&path)).err().unwrap();
        assert!(err.to_string().contains("At least one author is required"));

        let path = write_problem(
            dir.path(),
            r#"
            [problem]
            decision-variables = ["u"]
            cost = "u^2"
            "#,
        );
        assert!(matches!(
            build_config(&args_for(&path)),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn problem_section_is_required() {
        let dir = tempdir().unwrap();
        let path = write_problem(
            dir.path(),
            r#"
            [project]
            name = "demo"
            authors = ["Jane Doe"]
            "#,
        );
        let err = build_config(&args_for(&path)).err().unwrap();
        assert!(err.to_string().contains("[problem]"));
    }

    #[test]
    fn empty_name_override_is_an_argument_error() {
        let dir = tempdir().unwrap();
        let path = write_problem(dir.path(), PROBLEM);
        let mut args = args_for(&path);
        args.name = Some("  ".to_string());

        assert!(matches!(build_config(&args), Err(CliError::Argument(_))));
    }
}
