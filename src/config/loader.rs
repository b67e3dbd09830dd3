use super::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "freqset.toml";

/// Find config file in order of priority:
/// 1. Explicit --config flag path
/// 2. ./freqset.toml (current directory)
/// 3. ~/.config/freqset/freqset.toml
/// 4. ~/.freqset.toml
///
/// Returns `Ok(None)` when nothing is found; the built-in commands apply then.
pub fn find_config_file(explicit_path: Option<&Path>) -> Result<Option<PathBuf>> {
    // 1. Explicit path
    if let Some(path) = explicit_path {
        if path.exists() {
            return Ok(Some(path.to_path_buf()));
        }
        anyhow::bail!("Config file not found: {}", path.display());
    }

    Ok(candidate_paths().into_iter().find(|path| path.exists()))
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(".").join(CONFIG_FILE_NAME)];

    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("freqset").join(CONFIG_FILE_NAME));
    }

    if let Some(home_dir) = dirs::home_dir() {
        candidates.push(home_dir.join(".freqset.toml"));
    }

    candidates
}

/// Load and parse config file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?;

    Ok(config)
}

/// Load config with automatic discovery, falling back to defaults
pub fn load_config_auto(explicit_path: Option<&Path>) -> Result<(Option<PathBuf>, Config)> {
    match find_config_file(explicit_path)? {
        Some(path) => {
            let config = load_config(&path)?;
            Ok((Some(path), config))
        }
        None => Ok((None, Config::default())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = find_config_file(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "[shell]\nprogram = \"pwsh\"\nargs = [\"-NoLogo\", \"-Command\"]\n",
        )
        .unwrap();

        let (found, config) = load_config_auto(Some(&path)).unwrap();
        assert_eq!(found, Some(path));
        assert_eq!(config.shell.program, "pwsh");
        assert_eq!(config.shell.args, vec!["-NoLogo", "-Command"]);
    }

    #[test]
    fn test_malformed_toml_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[shell\nprogram = ").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_candidates_start_with_current_directory() {
        let candidates = candidate_paths();
        assert_eq!(candidates[0], PathBuf::from(".").join(CONFIG_FILE_NAME));
    }
}
