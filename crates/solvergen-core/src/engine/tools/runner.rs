use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write input to `{command}`: {source}")]
    Stdin {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}", describe_exit(.code))]
    Failed { command: String, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// A fully described subprocess call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: PathBuf,
    pub stdin: Option<Vec<u8>>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, current_dir: impl AsRef<Path>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: current_dir.as_ref().to_path_buf(),
            stdin: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, input: Vec<u8>) -> Self {
        self.stdin = Some(input);
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Executes invocations and surfaces their exit status.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), ToolError>;
}

/// Runs invocations as real child processes, inheriting stdout and stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), ToolError> {
        let command = invocation.to_string();
        debug!(
            command = command.as_str(),
            cwd = %invocation.current_dir.display(),
            "Spawning external tool."
        );

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .current_dir(&invocation.current_dir)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let (status, stdin_error) = match &invocation.stdin {
            None => (
                cmd.status().map_err(|source| ToolError::Spawn {
                    command: command.clone(),
                    source,
                })?,
                None,
            ),
            Some(input) => {
                let mut child =
                    cmd.stdin(Stdio::piped())
                        .spawn()
                        .map_err(|source| ToolError::Spawn {
                            command: command.clone(),
                            source,
                        })?;
                let stdin_error = child
                    .stdin
                    .take()
                    .and_then(|mut stdin| stdin.write_all(input).err());
                let status = child.wait().map_err(|source| ToolError::Spawn {
                    command: command.clone(),
                    source,
                })?;
                (status, stdin_error)
            }
        };

        // A child may exit successfully without draining its input.
        if let Some(source) = stdin_error {
            if !(status.success() && source.kind() == ErrorKind::BrokenPipe) {
                return Err(ToolError::Stdin { command, source });
            }
            debug!(command = command.as_str(), "Child exited before reading all input.");
        }

        if status.success() {
            Ok(())
        } else {
            Err(ToolError::Failed {
                command,
                code: status.code(),
            })
        }
    }
}
