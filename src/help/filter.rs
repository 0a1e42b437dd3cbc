//! Visibility filtering and category grouping for command listings.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::check::CommandCheck;
use super::types::FormatterConfig;
use crate::catalog::{Command, CommandMap};

/// A `(key, command)` pair taken from a [`CommandMap`].
pub type Entry<'a> = (&'a str, &'a Arc<Command>);

/// Keep the entries a listing may show, in catalog order.
///
/// Hidden commands need `show_hidden`. Unless `show_unauthorized` is set,
/// commands must also pass `check`; a failing check counts as not visible.
pub fn filter_visible<'a>(
    commands: &'a CommandMap,
    config: &FormatterConfig,
    check: &dyn CommandCheck,
) -> Vec<Entry<'a>> {
    commands
        .iter()
        .filter(|(key, command)| {
            if command.hidden && !config.show_hidden {
                tracing::trace!(key, "skipping hidden command");
                return false;
            }
            if config.show_unauthorized {
                return true;
            }
            match check.can_run(command) {
                Ok(allowed) => allowed,
                Err(err) => {
                    tracing::debug!(key, %err, "check failed, hiding command");
                    false
                }
            }
        })
        .collect()
}

/// Whether `key` only exists because it is an alias of `command`.
pub fn is_alias_entry(key: &str, command: &Command) -> bool {
    key != command.name && command.aliases.iter().any(|alias| alias == key)
}

/// Drop alias keys so each command is listed once.
pub fn without_aliases<'a>(entries: Vec<Entry<'a>>) -> Vec<Entry<'a>> {
    entries
        .into_iter()
        .filter(|(key, command)| !is_alias_entry(key, command))
        .collect()
}

/// Category a command is listed under.
///
/// Named categories order by plain string comparison and
/// `Uncategorized` always comes after all of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryLabel {
    Named(String),
    Uncategorized,
}

impl CategoryLabel {
    pub fn of(command: &Command) -> Self {
        match &command.category {
            Some(name) => CategoryLabel::Named(name.clone()),
            None => CategoryLabel::Uncategorized,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CategoryLabel::Named(name) => name,
            CategoryLabel::Uncategorized => "No Category",
        }
    }
}

impl Ord for CategoryLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CategoryLabel::Named(a), CategoryLabel::Named(b)) => a.cmp(b),
            (CategoryLabel::Named(_), CategoryLabel::Uncategorized) => Ordering::Less,
            (CategoryLabel::Uncategorized, CategoryLabel::Named(_)) => Ordering::Greater,
            (CategoryLabel::Uncategorized, CategoryLabel::Uncategorized) => Ordering::Equal,
        }
    }
}

impl PartialOrd for CategoryLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Header line form, e.g. `Math:`.
impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name())
    }
}

/// One category and its members, in listing order.
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub label: CategoryLabel,
    pub members: Vec<Entry<'a>>,
}

/// Sort entries by category and group consecutive runs.
///
/// The sort is stable, so members keep the order they came in with.
pub fn group_by_category(entries: Vec<Entry<'_>>) -> Vec<CategoryGroup<'_>> {
    let mut labelled: Vec<(CategoryLabel, Entry<'_>)> = entries
        .into_iter()
        .map(|entry| (CategoryLabel::of(entry.1), entry))
        .collect();
    labelled.sort_by(|a, b| a.0.cmp(&b.0));

    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    for (label, entry) in labelled {
        match groups.last_mut() {
            Some(group) if group.label == label => group.members.push(entry),
            _ => groups.push(CategoryGroup {
                label,
                members: vec![entry],
            }),
        }
    }
    groups
}

/// Root commands that belong to the category called `name`.
pub fn in_category<'a>(entries: Vec<Entry<'a>>, name: &str) -> Vec<Entry<'a>> {
    entries
        .into_iter()
        .filter(|(_, command)| CategoryLabel::of(command).name() == name)
        .collect()
}
