//! Command runner backed by `std::process`

use std::fs::File;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::domain::ports::{CommandOutput, CommandRunner, CommandSpec, StdinSource};
use crate::error::{MastermindError, MastermindResult};

/// Runs commands on the host, resolving programs through `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> MastermindResult<CommandOutput> {
        let program = which::which(&spec.program).map_err(|_| MastermindError::ToolNotFound {
            program: spec.program.clone(),
        })?;

        tracing::debug!(command = %spec.display(), cwd = ?spec.cwd, "running command");

        let mut cmd = Command::new(program);
        cmd.args(&spec.args);
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }

        match &spec.stdin {
            StdinSource::Null => {
                cmd.stdin(Stdio::null());
            }
            StdinSource::File(path) => {
                let file = File::open(path).map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => MastermindError::FileNotFound { path: path.clone() },
                    _ => MastermindError::Io(e),
                })?;
                cmd.stdin(Stdio::from(file));
            }
            StdinSource::Bytes(_) => {
                cmd.stdin(Stdio::piped());
            }
        }

        match &spec.stdout_file {
            Some(path) => {
                cmd.stdout(Stdio::from(File::create(path)?));
            }
            None => {
                cmd.stdout(Stdio::piped());
            }
        }
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn()?;
        if let StdinSource::Bytes(bytes) = &spec.stdin {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(bytes)?;
            }
        }

        let output = child.wait_with_output()?;
        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        tracing::debug!(command = %spec.display(), code = ?result.code, "command finished");
        Ok(result)
    }
}
