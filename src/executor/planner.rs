use crate::executor::FrequencyRequest;

/// Placeholder replaced by the requested frequency in MHz
pub const FREQUENCY_PLACEHOLDER: &str = "%d";

/// Built-in command sequence. The activation command must stay last so the
/// four caps take effect together.
pub const DEFAULT_TEMPLATES: &[&str] = &[
    "powercfg /setACvalueindex scheme_current SUB_PROCESSOR PROCFREQMAX %d",
    "powercfg /setACvalueindex scheme_current SUB_PROCESSOR PROCFREQMAX1 %d",
    "powercfg /setDCvalueindex scheme_current SUB_PROCESSOR PROCFREQMAX %d",
    "powercfg /setDCvalueindex scheme_current SUB_PROCESSOR PROCFREQMAX1 %d",
    "powercfg /setactive scheme_current",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// Contains at least one placeholder
    PerFrequency(String),
    /// Run exactly as written
    Literal(String),
}

impl CommandSpec {
    pub fn from_template(template: &str) -> Self {
        if template.contains(FREQUENCY_PLACEHOLDER) {
            CommandSpec::PerFrequency(template.to_string())
        } else {
            CommandSpec::Literal(template.to_string())
        }
    }

    pub fn is_parameterized(&self) -> bool {
        matches!(self, CommandSpec::PerFrequency(_))
    }

    pub fn render(&self, request: FrequencyRequest) -> String {
        match self {
            CommandSpec::PerFrequency(template) => {
                template.replace(FREQUENCY_PLACEHOLDER, &request.mhz().to_string())
            }
            CommandSpec::Literal(command) => command.clone(),
        }
    }
}

#[allow(dead_code)]
pub fn default_specs() -> Vec<CommandSpec> {
    DEFAULT_TEMPLATES
        .iter()
        .map(|t| CommandSpec::from_template(t))
        .collect()
}

/// Concrete commands for one request, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    pub commands: Vec<String>,
}

impl CommandPlan {
    pub fn build(specs: &[CommandSpec], request: FrequencyRequest) -> Self {
        let commands = specs.iter().map(|spec| spec.render(request)).collect();
        Self { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(mhz: u32) -> FrequencyRequest {
        FrequencyRequest::parse(&mhz.to_string()).unwrap()
    }

    #[test]
    fn test_default_plan_has_five_commands_in_order() {
        let plan = CommandPlan::build(&default_specs(), request(3500));
        assert_eq!(
            plan.commands,
            vec![
                "powercfg /setACvalueindex scheme_current SUB_PROCESSOR PROCFREQMAX 3500",
                "powercfg /setACvalueindex scheme_current SUB_PROCESSOR PROCFREQMAX1 3500",
                "powercfg /setDCvalueindex scheme_current SUB_PROCESSOR PROCFREQMAX 3500",
                "powercfg /setDCvalueindex scheme_current SUB_PROCESSOR PROCFREQMAX1 3500",
                "powercfg /setactive scheme_current",
            ]
        );
    }

    #[test]
    fn test_substitution_uses_plain_decimal() {
        for mhz in [1, 800, 2000, 4_294_967] {
            let plan = CommandPlan::build(&default_specs(), request(mhz));
            assert_eq!(plan.len(), 5);
            for command in &plan.commands[..4] {
                assert!(command.ends_with(&format!(" {}", mhz)));
                assert!(!command.contains(FREQUENCY_PLACEHOLDER));
            }
            assert_eq!(plan.commands[4], "powercfg /setactive scheme_current");
        }
    }

    #[test]
    fn test_activation_command_is_literal() {
        let specs = default_specs();
        assert!(specs[..4].iter().all(CommandSpec::is_parameterized));
        assert_eq!(
            specs[4],
            CommandSpec::Literal("powercfg /setactive scheme_current".to_string())
        );
    }

    #[test]
    fn test_every_placeholder_is_replaced() {
        let spec = CommandSpec::from_template("set %d then %d");
        assert_eq!(spec.render(request(42)), "set 42 then 42");
    }
}
