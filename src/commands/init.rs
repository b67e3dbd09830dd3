use crate::config::{Config, CONFIG_FILE_NAME};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use toml_edit::{value, Array, DocumentMut, Item, Table, Value};

pub fn run(path: Option<&Path>, force: bool) -> Result<()> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".").join(CONFIG_FILE_NAME));

    write_default_config(&path, force)?;

    println!("{} Wrote {}", "✓".green(), path.display().to_string().cyan());
    println!(
        "  Edit [commands] templates to change what runs; {} is replaced by the frequency.",
        "%d".cyan()
    );
    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let doc = default_config_document(&Config::default());
    fs::write(path, doc.to_string())
        .with_context(|| format!("Failed to write config: {}", path.display()))?;

    log::debug!("Wrote default config to {}", path.display());
    Ok(())
}

fn default_config_document(config: &Config) -> DocumentMut {
    let mut doc = DocumentMut::new();

    let mut args = Array::new();
    for arg in &config.shell.args {
        args.push(arg.as_str());
    }

    let mut shell = Table::new();
    shell.decor_mut().set_prefix(
        "# Interpreter that receives each command as a single argument\n",
    );
    shell["program"] = value(config.shell.program.as_str());
    shell["args"] = value(args);
    doc.insert("shell", Item::Table(shell));

    let mut templates = Array::new();
    for template in &config.commands.templates {
        templates.push_formatted(Value::from(template.as_str()).decorated("\n    ", ""));
    }
    templates.set_trailing("\n");
    templates.set_trailing_comma(true);

    let mut commands = Table::new();
    commands.decor_mut().set_prefix(
        "\n# Run top to bottom, one at a time. %d becomes the frequency in MHz.\n\
         # Keep the activation command last.\n",
    );
    commands["templates"] = value(templates);
    doc.insert("commands", Item::Table(commands));

    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_written_file_loads_back_as_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        write_default_config(&path, false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Keep the activation command last."));
        assert!(content.contains("powercfg /setactive scheme_current"));
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_existing_file_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "# mine\n").unwrap();

        assert!(write_default_config(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");

        write_default_config(&path, true).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }
}
