use super::Config;
use anyhow::Result;

/// Validate config for correctness
pub fn validate_config(config: &Config) -> Result<()> {
    validate_shell(config)?;
    validate_templates(config)?;
    Ok(())
}

fn validate_shell(config: &Config) -> Result<()> {
    if config.shell.program.trim().is_empty() {
        anyhow::bail!("[shell] program must not be empty");
    }
    Ok(())
}

/// The sequence must exist and actually use the requested frequency
fn validate_templates(config: &Config) -> Result<()> {
    let templates = &config.commands.templates;

    if templates.is_empty() {
        anyhow::bail!("[commands] templates must list at least one command");
    }

    if let Some(index) = templates.iter().position(|t| t.trim().is_empty()) {
        anyhow::bail!("[commands] template #{} is blank", index + 1);
    }

    if !config.command_specs().iter().any(|spec| spec.is_parameterized()) {
        anyhow::bail!(
            "[commands] no template contains the %d frequency placeholder"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_templates(templates: &[&str]) -> Config {
        let mut config = Config::default();
        config.commands.templates = templates.iter().map(|t| t.to_string()).collect();
        config
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_empty_program_is_rejected() {
        let mut config = Config::default();
        config.shell.program = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_template_rules() {
        assert!(validate_config(&config_with_templates(&[])).is_err());
        assert!(validate_config(&config_with_templates(&["echo %d", " "])).is_err());
        assert!(validate_config(&config_with_templates(&["powercfg /setactive scheme_current"])).is_err());
        assert!(validate_config(&config_with_templates(&["echo %d"])).is_ok());
    }

    #[test]
    fn test_blank_template_error_is_one_based() {
        let err = validate_config(&config_with_templates(&["echo %d", ""])).unwrap_err();
        assert_eq!(err.to_string(), "[commands] template #2 is blank");
    }
}
