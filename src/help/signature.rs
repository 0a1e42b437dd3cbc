//! Usage lines shown in help output.

use crate::catalog::{Command, Parameter};

/// Usage line for `command`: prefix, name (with aliases) and one token per
/// parameter, e.g. `!roll[r|dice] sides=6 modifiers...`.
pub fn command_signature(command: &Command, prefix: &str) -> String {
    let mut result = Vec::with_capacity(command.parameters.len() + 1);

    if command.aliases.is_empty() {
        result.push(format!("{}{}", prefix, command.name));
    } else {
        result.push(format!(
            "{}{}[{}]",
            prefix,
            command.name,
            command.aliases.join("|")
        ));
    }

    result.extend(command.parameters.iter().map(parameter_token));
    result.join(" ")
}

fn parameter_token(parameter: &Parameter) -> String {
    let name = parameter.name.replace('_', "-");
    if parameter.has_default {
        format!("{}={}", name, parameter.default.as_deref().unwrap_or_default())
    } else if parameter.is_variadic {
        format!("{}...", name)
    } else {
        name
    }
}

/// Closing hint telling the user how to dig deeper.
pub fn ending_note(prefix: &str) -> String {
    format!(
        "Type {0}help command for more info on a command.\n\
         You can also type {0}help category for more info on a category.",
        prefix
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name() {
        assert_eq!(command_signature(&Command::new("ping"), "!"), "!ping");
    }

    #[test]
    fn aliases_in_brackets() {
        let cmd = Command::new("roll").alias("r").alias("dice");
        assert_eq!(command_signature(&cmd, "!"), "!roll[r|dice]");
    }

    #[test]
    fn parameter_tokens() {
        let cmd = Command::new("roll")
            .param(Parameter::required("dice_count"))
            .param(Parameter::optional("sides", "6"))
            .param(Parameter::variadic("extra_mods"));
        assert_eq!(
            command_signature(&cmd, "?"),
            "?roll dice-count sides=6 extra-mods..."
        );
    }

    #[test]
    fn default_wins_over_variadic() {
        let param = Parameter {
            is_variadic: true,
            ..Parameter::optional("rest", "none")
        };
        assert_eq!(parameter_token(&param), "rest=none");
    }

    #[test]
    fn default_without_value() {
        let param = Parameter {
            has_default: true,
            ..Parameter::required("flag")
        };
        assert_eq!(parameter_token(&param), "flag=");
    }

    #[test]
    fn ending_note_uses_prefix() {
        assert_eq!(
            ending_note("@bot "),
            "Type @bot help command for more info on a command.\n\
             You can also type @bot help category for more info on a category."
        );
    }
}
