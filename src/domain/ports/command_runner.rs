//! CommandRunner port - abstraction over external processes
//!
//! Every external command is an explicit program plus argument vector; nothing
//! is handed to a host shell.

use std::path::{Path, PathBuf};

use crate::error::{MastermindError, MastermindResult};

/// Where the child's stdin comes from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StdinSource {
    /// Closed stdin
    #[default]
    Null,
    /// Contents of a file
    File(PathBuf),
    /// In-memory bytes
    Bytes(Vec<u8>),
}

/// A fully described process invocation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
    pub stdin: StdinSource,
    /// Stream stdout into this file instead of capturing it
    pub stdout_file: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
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

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn stdin(mut self, stdin: StdinSource) -> Self {
        self.stdin = stdin;
        self
    }

    pub fn stdout_to(mut self, file: impl AsRef<Path>) -> Self {
        self.stdout_file = Some(file.as_ref().to_path_buf());
        self
    }

    /// Human readable command line, for logs and error messages
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self {
            code: Some(0),
            ..Self::default()
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// stdout followed by stderr
    pub fn combined(&self) -> String {
        match (self.stdout.trim().is_empty(), self.stderr.trim().is_empty()) {
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr.trim_end()),
            (false, true) => self.stdout.trim_end().to_string(),
            (true, false) => self.stderr.trim_end().to_string(),
            (true, true) => String::new(),
        }
    }
}

pub trait CommandRunner: Send + Sync {
    /// Run to completion. A non-zero exit is not an error at this level;
    /// failing to spawn is.
    fn run(&self, spec: &CommandSpec) -> MastermindResult<CommandOutput>;

    /// Run and turn a non-zero exit into `CommandFailed`.
    fn run_checked(&self, spec: &CommandSpec) -> MastermindResult<CommandOutput> {
        let output = self.run(spec)?;
        if output.is_success() {
            Ok(output)
        } else {
            let stderr = if output.stderr.trim().is_empty() {
                output.stdout.trim().to_string()
            } else {
                output.stderr.trim().to_string()
            };
            Err(MastermindError::CommandFailed {
                command: spec.display(),
                code: output.code,
                stderr,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_joins_program_and_args() {
        let spec = CommandSpec::new("docker").args(["compose", "up", "-d", "auth-db"]);
        assert_eq!(spec.display(), "docker compose up -d auth-db");
    }

    #[test]
    fn combined_output_skips_empty_streams() {
        assert_eq!(CommandOutput::success().with_stdout("ok\n").combined(), "ok");
        assert_eq!(CommandOutput::failure(1, "bad\n").combined(), "bad");
    }
}
