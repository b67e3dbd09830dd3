use crate::executor::{default_specs, CommandPlan, CommandSpec, FrequencyRequest, ValidationError};
use crate::utils::CommandExecutor;
use serde::Serialize;
use std::sync::Arc;

/// Aggregate over every command of one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    pub success: bool,
    pub frequency: FrequencyRequest,
    pub progress: Vec<String>,
}

/// Collects progress lines and forwards each one as soon as it exists
struct ProgressLog<'a> {
    lines: Vec<String>,
    on_progress: &'a mut dyn FnMut(&str),
}

impl<'a> ProgressLog<'a> {
    fn new(on_progress: &'a mut dyn FnMut(&str)) -> Self {
        Self {
            lines: Vec::new(),
            on_progress,
        }
    }

    fn emit(&mut self, line: String) {
        (self.on_progress)(&line);
        self.lines.push(line);
    }
}

/// Applies a frequency by running the command sequence through an executor.
///
/// Holds no run state of its own; the same applier can serve any number of
/// sequential runs.
#[derive(Clone)]
pub struct FrequencyApplier {
    specs: Vec<CommandSpec>,
    executor: Arc<dyn CommandExecutor>,
}

impl FrequencyApplier {
    pub fn new(specs: Vec<CommandSpec>, executor: Arc<dyn CommandExecutor>) -> Self {
        Self { specs, executor }
    }

    #[allow(dead_code)]
    pub fn with_default_commands(executor: Arc<dyn CommandExecutor>) -> Self {
        Self::new(default_specs(), executor)
    }

    pub fn plan(&self, request: FrequencyRequest) -> CommandPlan {
        CommandPlan::build(&self.specs, request)
    }

    /// Validate `input` and run every command. Nothing executes when the
    /// input is rejected.
    pub fn apply(
        &self,
        input: &str,
        on_progress: &mut dyn FnMut(&str),
    ) -> Result<RunResult, ValidationError> {
        let request = FrequencyRequest::parse(input)?;
        Ok(self.run(request, on_progress))
    }

    /// Run every command for an already validated request. A failing command
    /// marks the run failed but never stops it.
    pub fn run(&self, request: FrequencyRequest, on_progress: &mut dyn FnMut(&str)) -> RunResult {
        let plan = self.plan(request);
        let mut progress = ProgressLog::new(on_progress);
        let mut all_success = true;

        log::info!("Applying {} ({} commands)", request, plan.len());

        for command in &plan.commands {
            progress.emit(format!("Executing: {}", command));

            let outcome = self.executor.execute(command);
            progress.emit(outcome.output);

            if !outcome.success {
                all_success = false;
                log::warn!("Command failed ({}): {}", outcome.exit_code, command);
                progress.emit(format!(
                    "ERROR: Command failed with exit code {}",
                    outcome.exit_code
                ));
            }
        }

        RunResult {
            success: all_success,
            frequency: request,
            progress: progress.lines,
        }
    }
}
