//! Authorization checks supplied by the host application.

use thiserror::Error;

use crate::catalog::Command;

/// Why a check refused to run.
///
/// The help formatter treats any failure as "not visible" and never surfaces it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckFailure {
    #[error("command {0} is disabled")]
    Disabled(String),
    #[error("command {command} requires the {role} role")]
    MissingRole { command: String, role: String },
    #[error("{0}")]
    Other(String),
}

/// Decides whether the invoking user may run a command.
pub trait CommandCheck {
    fn can_run(&self, command: &Command) -> Result<bool, CheckFailure>;
}

impl<F> CommandCheck for F
where
    F: Fn(&Command) -> Result<bool, CheckFailure>,
{
    fn can_run(&self, command: &Command) -> Result<bool, CheckFailure> {
        self(command)
    }
}

/// Check that lets every command through.
pub struct AllowAll;

impl CommandCheck for AllowAll {
    fn can_run(&self, _command: &Command) -> Result<bool, CheckFailure> {
        Ok(true)
    }
}

/// Check used by the `helpbook` host: disabled commands fail, and
/// categories listed in `restricted` need a matching role.
pub struct RoleCheck {
    roles: Vec<String>,
    restricted: Vec<(String, String)>,
}

impl RoleCheck {
    pub fn new(roles: Vec<String>) -> Self {
        Self {
            roles,
            restricted: Vec::new(),
        }
    }

    /// Require `role` for every command in `category`.
    pub fn restrict(mut self, category: &str, role: &str) -> Self {
        self.restricted
            .push((category.to_string(), role.to_string()));
        self
    }
}

impl CommandCheck for RoleCheck {
    fn can_run(&self, command: &Command) -> Result<bool, CheckFailure> {
        if !command.enabled {
            return Err(CheckFailure::Disabled(command.name.clone()));
        }

        let Some(category) = command.category.as_deref() else {
            return Ok(true);
        };

        for (restricted, role) in &self.restricted {
            if restricted == category && !self.roles.iter().any(|r| r == role) {
                return Err(CheckFailure::MissingRole {
                    command: command.name.clone(),
                    role: role.clone(),
                });
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_checks() {
        let check = |cmd: &Command| -> Result<bool, CheckFailure> { Ok(cmd.name != "secret") };
        assert_eq!(check.can_run(&Command::new("open")), Ok(true));
        assert_eq!(check.can_run(&Command::new("secret")), Ok(false));
    }

    #[test]
    fn role_check_rejects_disabled() {
        let check = RoleCheck::new(vec![]);
        let result = check.can_run(&Command::new("off").disabled());
        assert_eq!(result, Err(CheckFailure::Disabled("off".to_string())));
    }

    #[test]
    fn role_check_restricted_category() {
        let ban = Command::new("ban").category("Admin");
        let guest = RoleCheck::new(vec![]).restrict("Admin", "admin");
        let admin = RoleCheck::new(vec!["admin".to_string()]).restrict("Admin", "admin");

        assert!(matches!(guest.can_run(&ban), Err(CheckFailure::MissingRole { .. })));
        assert_eq!(admin.can_run(&ban), Ok(true));
        assert_eq!(guest.can_run(&Command::new("ping")), Ok(true));
    }
}
