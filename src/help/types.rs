//! Help formatting types.

use serde::Deserialize;

use super::check::{AllowAll, CommandCheck};
use super::prefix::resolve_display_prefix;
use crate::catalog::{Catalog, Command};

pub const DEFAULT_LINE_WIDTH: usize = 80;
pub const DEFAULT_PAGE_SIZE_LIMIT: usize = 2000;
pub const DEFAULT_PAGE_FENCE: &str = "```";

fn default_line_width() -> usize {
    DEFAULT_LINE_WIDTH
}

fn default_page_size_limit() -> usize {
    DEFAULT_PAGE_SIZE_LIMIT
}

fn default_page_fence() -> String {
    DEFAULT_PAGE_FENCE.to_string()
}

/// Settings fixed for the lifetime of a formatter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormatterConfig {
    /// Include commands marked hidden.
    #[serde(default)]
    pub show_hidden: bool,
    /// Include commands whose check fails.
    #[serde(default)]
    pub show_unauthorized: bool,
    #[serde(default = "default_line_width")]
    pub line_width: usize,
    /// Soft page budget in chars. Keep it below the display surface's hard cap
    /// so the closing fence and the last line still fit.
    #[serde(default = "default_page_size_limit")]
    pub page_size_limit: usize,
    #[serde(default = "default_page_fence")]
    pub page_fence: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            show_unauthorized: false,
            line_width: DEFAULT_LINE_WIDTH,
            page_size_limit: DEFAULT_PAGE_SIZE_LIMIT,
            page_fence: default_page_fence(),
        }
    }
}

/// The bot (or program) the help is printed for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BotIdentity {
    pub id: String,
    pub name: String,
}

impl BotIdentity {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

type DisplayNameFn = dyn Fn(&BotIdentity) -> String + Send + Sync;

/// Everything about the invocation that the formatter needs.
pub struct FormattingContext {
    /// Prefix the user typed, possibly a raw mention like `<@1234> `.
    pub prefix: String,
    pub identity: BotIdentity,
    display_name: Box<DisplayNameFn>,
    check: Box<dyn CommandCheck + Send + Sync>,
}

impl FormattingContext {
    pub fn new(prefix: &str, identity: BotIdentity) -> Self {
        Self {
            prefix: prefix.to_string(),
            identity,
            display_name: Box::new(|identity: &BotIdentity| format!("@{}", identity.name)),
            check: Box::new(AllowAll),
        }
    }

    pub fn with_check(mut self, check: impl CommandCheck + Send + Sync + 'static) -> Self {
        self.check = Box::new(check);
        self
    }

    pub fn with_display_name(
        mut self,
        resolver: impl Fn(&BotIdentity) -> String + Send + Sync + 'static,
    ) -> Self {
        self.display_name = Box::new(resolver);
        self
    }

    pub fn check(&self) -> &dyn CommandCheck {
        &*self.check
    }

    /// The prefix with self-mentions replaced by a readable name.
    pub fn clean_prefix(&self) -> String {
        resolve_display_prefix(&self.prefix, &self.identity, &*self.display_name)
    }
}

/// What a help request is about.
#[derive(Debug, Clone, Copy)]
pub enum HelpTarget<'a> {
    /// The whole catalog, listed by category.
    Root(&'a Catalog),
    /// One category of the root catalog.
    Category { catalog: &'a Catalog, name: &'a str },
    Command(&'a Command),
}

impl HelpTarget<'_> {
    pub fn description(&self) -> &str {
        match self {
            HelpTarget::Root(catalog) => &catalog.description,
            HelpTarget::Category { .. } => "",
            HelpTarget::Command(command) => &command.description,
        }
    }
}
