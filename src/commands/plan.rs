use crate::commands::apply::{build_applier, load_validated_config};
use crate::executor::FrequencyRequest;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub fn run(config_path: Option<&Path>, frequency: &str) -> Result<()> {
    let config = load_validated_config(config_path)?;
    let request = FrequencyRequest::parse(frequency)?;

    // The plan only renders commands; nothing is handed to the executor
    let plan = build_applier(&config, true).plan(request);

    println!(
        "{}",
        format!("Commands for {} ({} via {}):", request, plan.len(), config.shell.program)
            .bright_cyan()
            .bold()
    );
    for (i, command) in plan.commands.iter().enumerate() {
        println!("  {}. {}", i + 1, command);
    }

    Ok(())
}
