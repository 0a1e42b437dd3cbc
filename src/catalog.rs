//! Command catalog: the read-only tree of documented commands.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

/// A declared command parameter, used to build signatures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub has_default: bool,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub is_variadic: bool,
}

impl Parameter {
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn optional(name: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            has_default: true,
            default: Some(default.to_string()),
            is_variadic: false,
        }
    }

    pub fn variadic(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_variadic: true,
            ..Self::default()
        }
    }
}

fn enabled_by_default() -> bool {
    true
}

/// A single command. Having `subcommands` makes it a group.
#[derive(Debug, Clone, Deserialize)]
pub struct Command {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub short_doc: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub subcommands: Option<CommandMap>,
}

impl Command {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            short_doc: String::new(),
            help: String::new(),
            description: String::new(),
            category: None,
            hidden: false,
            enabled: true,
            parameters: Vec::new(),
            subcommands: None,
        }
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn short_doc(mut self, doc: &str) -> Self {
        self.short_doc = doc.to_string();
        self
    }

    pub fn help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Register a subcommand, turning this command into a group.
    pub fn subcommand(mut self, command: Command) -> Self {
        self.subcommands
            .get_or_insert_with(CommandMap::new)
            .register(command);
        self
    }

    /// Make this command a group even if it ends up with no children.
    pub fn group(mut self) -> Self {
        self.subcommands.get_or_insert_with(CommandMap::new);
        self
    }

    pub fn is_group(&self) -> bool {
        self.subcommands.is_some()
    }

    /// One-line summary for listings: `short_doc`, else the first line of `help`.
    pub fn summary(&self) -> &str {
        if !self.short_doc.is_empty() {
            return &self.short_doc;
        }
        self.help.lines().next().unwrap_or("")
    }
}

/// Ordered `key -> command` mapping.
///
/// Registering a command inserts it under its name and every alias, so alias
/// keys show up as extra entries pointing at the same command.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<Command>")]
pub struct CommandMap {
    entries: Vec<(String, Arc<Command>)>,
}

impl CommandMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `command` under its name and aliases.
    ///
    /// A key already owned by a different command keeps its owner; the clash
    /// is logged and the new key dropped. Registering a command with the same
    /// name again replaces it.
    pub fn register(&mut self, command: Command) {
        let command = Arc::new(command);
        self.insert(command.name.clone(), Arc::clone(&command));
        for alias in command.aliases.clone() {
            self.insert(alias, Arc::clone(&command));
        }
    }

    pub fn insert(&mut self, key: String, command: Arc<Command>) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) if existing.name != command.name => {
                tracing::warn!(
                    key = %key,
                    owner = %existing.name,
                    command = %command.name,
                    "key already registered to another command, skipping"
                );
            }
            Some(entry) => entry.1 = command,
            None => self.entries.push((key, command)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Arc<Command>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, command)| command)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Command>)> {
        self.entries
            .iter()
            .map(|(key, command)| (key.as_str(), command))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest command name among the entries, if any.
    pub fn max_name_len(&self) -> Option<usize> {
        self.entries
            .iter()
            .map(|(_, command)| crate::text::text_len(&command.name))
            .max()
    }
}

impl From<Vec<Command>> for CommandMap {
    fn from(commands: Vec<Command>) -> Self {
        let mut map = CommandMap::new();
        for command in commands {
            map.register(command);
        }
        map
    }
}

/// The root of the command tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub commands: CommandMap,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Invalid JSON in catalog: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("IO error reading catalog: {0}")]
    Io(#[from] std::io::Error),
}

impl Catalog {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            commands: CommandMap::new(),
        }
    }

    pub fn command(mut self, command: Command) -> Self {
        self.commands.register(command);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            commands = catalog.commands.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }
}
