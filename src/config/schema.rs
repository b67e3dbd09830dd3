use crate::executor::{CommandSpec, DEFAULT_TEMPLATES};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub shell: ShellConfig,

    #[serde(default)]
    pub commands: CommandsConfig,
}

/// Interpreter each command string is handed to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShellConfig {
    #[serde(default = "default_program")]
    pub program: String,

    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

#[cfg(windows)]
fn default_program() -> String {
    "powershell.exe".to_string()
}

#[cfg(not(windows))]
fn default_program() -> String {
    "sh".to_string()
}

#[cfg(windows)]
fn default_args() -> Vec<String> {
    vec!["-NoProfile".to_string(), "-Command".to_string()]
}

#[cfg(not(windows))]
fn default_args() -> Vec<String> {
    vec!["-c".to_string()]
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommandsConfig {
    /// Run in order; `%d` is replaced by the frequency in MHz
    #[serde(default = "default_templates")]
    pub templates: Vec<String>,
}

fn default_templates() -> Vec<String> {
    DEFAULT_TEMPLATES.iter().map(|t| t.to_string()).collect()
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            templates: default_templates(),
        }
    }
}

impl Config {
    pub fn command_specs(&self) -> Vec<CommandSpec> {
        self.commands
            .templates
            .iter()
            .map(|t| CommandSpec::from_template(t))
            .collect()
    }
}
