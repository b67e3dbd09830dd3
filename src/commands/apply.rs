use crate::config::{load_config_auto, validate_config, Config};
use crate::executor::{spawn_run, FrequencyApplier, FrequencyRequest, RunError, RunGuard, RunResult};
use crate::utils::{command_exists, CommandExecutor, DryRunExecutor, ShellExecutor};
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

/// Load and validate config, falling back to built-in commands
pub fn load_validated_config(config_path: Option<&Path>) -> Result<Config> {
    let (path, config) = load_config_auto(config_path)?;

    match &path {
        Some(path) => log::info!("Loaded config from: {}", path.display()),
        None => log::debug!("No config file found, using built-in commands"),
    }

    validate_config(&config)?;
    Ok(config)
}

pub fn build_applier(config: &Config, dry_run: bool) -> FrequencyApplier {
    let executor: Arc<dyn CommandExecutor> = if dry_run {
        Arc::new(DryRunExecutor)
    } else {
        Arc::new(ShellExecutor::new(
            config.shell.program.clone(),
            config.shell.args.clone(),
        ))
    };

    FrequencyApplier::new(config.command_specs(), executor)
}

pub fn run(
    config_path: Option<&Path>,
    frequency: Option<&str>,
    dry_run: bool,
    yes: bool,
    json: bool,
) -> Result<()> {
    let config = load_validated_config(config_path)?;

    let input = match frequency {
        Some(value) => value.to_string(),
        None => inquire::Text::new("Enter desired CPU frequency (MHz):")
            .with_help_message("A positive integer, e.g. 3500")
            .prompt()
            .context("Failed to read frequency")?,
    };

    // Rejected input never reaches the interpreter
    let request = FrequencyRequest::parse(&input)?;
    let applier = build_applier(&config, dry_run);

    if !dry_run && !command_exists(&config.shell.program) {
        log::warn!(
            "Interpreter '{}' not found in PATH, commands will likely fail",
            config.shell.program
        );
    }

    print_header(request, dry_run, json);

    if !dry_run && !yes {
        let confirmed = inquire::Confirm::new(&format!(
            "Apply {} to the active power scheme?",
            request
        ))
        .with_default(true)
        .prompt()?;

        if !confirmed {
            println!("{}", "Cancelled, nothing was changed.".yellow());
            return Ok(());
        }
    }

    let result = if dry_run {
        // Nothing is mutated, so no lock and no worker thread
        applier.apply(&input, &mut |line: &str| render_progress(line, json))?
    } else {
        run_in_background(applier, &input, json)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    report(&result, dry_run, json)
}

fn run_in_background(applier: FrequencyApplier, input: &str, json: bool) -> Result<RunResult> {
    let guard = RunGuard::system();
    log::debug!("Using run lock {}", guard.lock_path().display());

    let handle = match spawn_run(applier, input, &guard) {
        Ok(handle) => handle,
        Err(RunError::AlreadyRunning) => {
            bail!("Another freqset run is already changing the power scheme, try again when it finishes")
        }
        Err(e) => return Err(e.into()),
    };

    for line in handle.progress() {
        render_progress(&line, json);
    }

    match handle.join() {
        Ok(result) => Ok(result),
        Err(e) => {
            emit(
                &"An error occurred during execution.".red().bold().to_string(),
                json,
            );
            Err(e.into())
        }
    }
}

fn print_header(request: FrequencyRequest, dry_run: bool, json: bool) {
    if json {
        return;
    }

    println!("{}", "=".repeat(50).bright_blue());
    println!(
        "{}",
        format!("Setting maximum CPU frequency to {}", request)
            .bright_blue()
            .bold()
    );
    println!("{}", "=".repeat(50).bright_blue());
    println!();

    if dry_run {
        println!("{}", "[DRY RUN MODE]".yellow().bold());
        println!();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Human-readable text goes to stderr in JSON mode so stdout stays parseable
fn human_stream(json: bool) -> Stream {
    if json {
        Stream::Stderr
    } else {
        Stream::Stdout
    }
}

fn emit(text: &str, json: bool) {
    match human_stream(json) {
        Stream::Stdout => println!("{}", text),
        Stream::Stderr => eprintln!("{}", text),
    }
}

fn render_progress(line: &str, json: bool) {
    let text = line.strip_suffix('\n').unwrap_or(line);
    let rendered = if line.starts_with("Executing: ") {
        text.cyan().to_string()
    } else if line.starts_with("ERROR: ") {
        text.red().bold().to_string()
    } else {
        text.to_string()
    };

    emit(&rendered, json);
}

fn report(result: &RunResult, dry_run: bool, json: bool) -> Result<()> {
    emit("", json);

    if result.success {
        let message = if dry_run {
            format!("Dry run complete, {} was not applied", result.frequency)
        } else {
            format!("CPU frequency applied successfully to {}", result.frequency)
        };
        emit(&format!("✓ {}", message).bright_green().bold().to_string(), json);
        return Ok(());
    }

    emit(
        &"Error applying new CPU frequency. Check output for details."
            .red()
            .bold()
            .to_string(),
        json,
    );
    emit(
        &format!("💡 {}", "Ensure you are running this as admin.".bright_yellow()),
        json,
    );

    bail!("One or more commands failed");
}
