//! Recording command runner for tests and dry runs
//!
//! Never spawns anything. Each call is recorded and answered by the first
//! rule whose needle occurs in the rendered command line.

use std::fs;
use std::sync::Mutex;

use crate::domain::ports::{CommandOutput, CommandRunner, CommandSpec};
use crate::error::MastermindResult;

#[derive(Debug, Default)]
pub struct RecordingRunner {
    rules: Vec<(String, CommandOutput)>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer commands containing `needle` with `output`
    pub fn respond(mut self, needle: &str, output: CommandOutput) -> Self {
        self.rules.push((needle.to_string(), output));
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Rendered command lines, in call order
    pub fn commands(&self) -> Vec<String> {
        self.calls().iter().map(CommandSpec::display).collect()
    }

    fn answer(&self, spec: &CommandSpec) -> CommandOutput {
        let line = spec.display();
        self.rules
            .iter()
            .find(|(needle, _)| line.contains(needle.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_else(CommandOutput::success)
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec) -> MastermindResult<CommandOutput> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(spec.clone());

        let mut output = self.answer(spec);
        if let Some(path) = &spec.stdout_file {
            fs::write(path, &output.stdout)?;
            output.stdout.clear();
        }
        Ok(output)
    }
}
