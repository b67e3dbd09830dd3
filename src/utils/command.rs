use serde::Serialize;
use std::io::{self, Read};
use std::process::{Command, Stdio};

/// Exit code reported when a command could not be started or did not finish
pub const UNKNOWN_EXIT_CODE: i32 = -1;

/// Result of running one concrete command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub success: bool,
    pub exit_code: i32,
    pub output: String,
}

impl CommandOutcome {
    pub fn from_exit_code(exit_code: i32, output: String) -> Self {
        Self {
            success: exit_code == 0,
            exit_code,
            output,
        }
    }

    /// Outcome for a command that never produced an exit code
    pub fn failed_to_run(error: &io::Error) -> Self {
        Self {
            success: false,
            exit_code: UNKNOWN_EXIT_CODE,
            output: format!("Exception during command execution: {}\n", error),
        }
    }
}

/// Runs one fully-formed command string and reports what happened.
///
/// Implementations never return an error: every failure is folded into a
/// [`CommandOutcome`] with `success == false`.
pub trait CommandExecutor: Send + Sync {
    fn execute(&self, command: &str) -> CommandOutcome;
}

/// Hands each command to an OS command interpreter, e.g.
/// `powershell.exe -NoProfile -Command <command>` or `sh -c <command>`.
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    program: String,
    args: Vec<String>,
}

impl ShellExecutor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn try_execute(&self, command: &str) -> io::Result<CommandOutcome> {
        // stdout and stderr share one pipe so their output interleaves in order
        let (mut reader, writer) = io::pipe()?;
        let stderr_writer = writer.try_clone()?;

        // The Command owns the parent's copies of the write end; dropping it
        // right after spawn lets the read below see EOF when the child exits.
        let mut child = {
            let mut cmd = Command::new(&self.program);
            cmd.args(&self.args)
                .arg(command)
                .stdin(Stdio::null())
                .stdout(writer)
                .stderr(stderr_writer);
            cmd.spawn()?
        };

        let mut raw = Vec::new();
        let read_result = reader.read_to_end(&mut raw);
        let status = child.wait()?;
        read_result?;

        let exit_code = status.code().unwrap_or(UNKNOWN_EXIT_CODE);
        Ok(CommandOutcome::from_exit_code(
            exit_code,
            normalize_output(&String::from_utf8_lossy(&raw)),
        ))
    }
}

impl CommandExecutor for ShellExecutor {
    fn execute(&self, command: &str) -> CommandOutcome {
        log::debug!("Executing shell: {} {} {}", self.program, self.args.join(" "), command);

        match self.try_execute(command) {
            Ok(outcome) => {
                log::debug!("Exit code {} for: {}", outcome.exit_code, command);
                outcome
            }
            Err(e) => {
                log::error!("Failed to run '{}' via {}: {}", command, self.program, e);
                CommandOutcome::failed_to_run(&e)
            }
        }
    }
}

/// Stands in for a real interpreter when nothing should be mutated
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunExecutor;

impl CommandExecutor for DryRunExecutor {
    fn execute(&self, command: &str) -> CommandOutcome {
        log::debug!("Dry run, skipping: {}", command);
        CommandOutcome::from_exit_code(0, "[dry run] not executed\n".to_string())
    }
}

/// Terminate every line with `\n`, whatever the child used
fn normalize_output(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len() + 1);
    for line in text.lines() {
        normalized.push_str(line);
        normalized.push('\n');
    }
    normalized
}

/// Check if a command exists in PATH
pub fn command_exists(command: &str) -> bool {
    which::which(command).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[cfg(unix)]
    fn sh() -> ShellExecutor {
        ShellExecutor::new("sh", vec!["-c".to_string()])
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_zero_is_success() {
        let outcome = sh().execute("echo hello");
        assert_eq!(
            outcome,
            CommandOutcome {
                success: true,
                exit_code: 0,
                output: "hello\n".to_string(),
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure_with_raw_code() {
        let outcome = sh().execute("exit 7");
        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, 7);
        assert_eq!(outcome.output, "");
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_and_stderr_are_merged_in_order() {
        let outcome = sh().execute("echo first; echo second 1>&2; echo third; exit 3");
        assert_eq!(outcome.exit_code, 3);
        assert_eq!(outcome.output, "first\nsecond\nthird\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_string_is_not_split_locally() {
        let outcome = sh().execute("printf '%s|%s\\n' 'a b' c");
        assert!(outcome.success);
        assert_eq!(outcome.output, "a b|c\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_unterminated_last_line_gets_newline() {
        let outcome = sh().execute("printf 'no newline'");
        assert_eq!(outcome.output, "no newline\n");
    }

    #[test]
    fn test_spawn_failure_is_reported_not_raised() {
        let executor = ShellExecutor::new("freqset-no-such-interpreter", vec![]);
        let outcome = executor.execute("anything");
        assert!(!outcome.success);
        assert_eq!(outcome.exit_code, UNKNOWN_EXIT_CODE);
        assert!(outcome
            .output
            .starts_with("Exception during command execution: "));
    }

    #[test]
    fn test_dry_run_always_succeeds() {
        let outcome = DryRunExecutor.execute("powercfg /setactive scheme_current");
        assert!(outcome.success);
        assert_eq!(outcome.exit_code, 0);
    }

    #[test]
    fn test_normalize_output_handles_crlf() {
        assert_eq!(normalize_output("a\r\nb\r\n"), "a\nb\n");
        assert_eq!(normalize_output(""), "");
    }
}
