//! Resolve `help <path...>` queries against a catalog.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use thiserror::Error;

use crate::catalog::{Catalog, CommandMap};
use crate::help::HelpTarget;

const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("No command called \"{name}\" found.{}", did_you_mean(.suggestions))]
    NotFound {
        name: String,
        suggestions: Vec<String>,
    },
    #[error("Command \"{parent}\" has no subcommands.")]
    NoSubcommands { parent: String },
    #[error("Command \"{parent}\" has no subcommand named {name}.{}", did_you_mean(.suggestions))]
    NoSuchSubcommand {
        parent: String,
        name: String,
        suggestions: Vec<String>,
    },
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" Did you mean: {}?", suggestions.join(", "))
    }
}

/// Find what `help <path...>` refers to.
///
/// An empty path is the whole catalog. A single word that is not a command
/// but names a category resolves to that category. Hidden commands can be
/// looked up by exact name but are never suggested.
pub fn resolve<'a>(catalog: &'a Catalog, path: &[&str]) -> Result<HelpTarget<'a>, LookupError> {
    let Some((first, rest)) = path.split_first() else {
        return Ok(HelpTarget::Root(catalog));
    };

    let Some(mut command) = catalog.commands.get(first) else {
        if rest.is_empty()
            && let Some(name) = category_named(catalog, first)
        {
            return Ok(HelpTarget::Category { catalog, name });
        }

        tracing::debug!(name = first, "no such command");
        return Err(LookupError::NotFound {
            name: first.to_string(),
            suggestions: suggest(first, &catalog.commands),
        });
    };

    for name in rest {
        let Some(subcommands) = &command.subcommands else {
            return Err(LookupError::NoSubcommands {
                parent: command.name.clone(),
            });
        };

        command = subcommands
            .get(name)
            .ok_or_else(|| LookupError::NoSuchSubcommand {
                parent: command.name.clone(),
                name: name.to_string(),
                suggestions: suggest(name, subcommands),
            })?;
    }

    Ok(HelpTarget::Command(command.as_ref()))
}

/// The catalog's spelling of category `name`, if any non-hidden command uses it.
fn category_named<'a>(catalog: &'a Catalog, name: &str) -> Option<&'a str> {
    catalog
        .commands
        .iter()
        .filter(|(_, command)| !command.hidden)
        .filter_map(|(_, command)| command.category.as_deref())
        .find(|category| *category == name)
}

/// Closest non-hidden keys to `input`, best match first.
fn suggest(input: &str, commands: &CommandMap) -> Vec<String> {
    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, &str)> = commands
        .iter()
        .filter(|(_, command)| !command.hidden)
        .filter_map(|(key, _)| matcher.fuzzy_match(key, input).map(|score| (score, key)))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, key)| key.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Command;
    use crate::test_helpers::sample_catalog;

    fn catalog() -> Catalog {
        sample_catalog()
            .command(
                Command::new("tag")
                    .alias("t")
                    .subcommand(Command::new("create"))
                    .subcommand(Command::new("delete")),
            )
            .command(Command::new("debug").hidden())
            .command(Command::new("trace").category("Secret").hidden())
    }

    fn command_name(target: HelpTarget<'_>) -> String {
        match target {
            HelpTarget::Command(command) => command.name.clone(),
            other => panic!("expected a command, got {other:?}"),
        }
    }

    #[test]
    fn empty_path_is_root() {
        let catalog = catalog();
        assert!(matches!(resolve(&catalog, &[]), Ok(HelpTarget::Root(_))));
    }

    #[test]
    fn resolves_top_level_command() {
        let catalog = catalog();
        assert_eq!(command_name(resolve(&catalog, &["add"]).unwrap()), "add");
    }

    #[test]
    fn resolves_alias() {
        let catalog = catalog();
        assert_eq!(command_name(resolve(&catalog, &["t"]).unwrap()), "tag");
    }

    #[test]
    fn resolves_subcommand_chain() {
        let catalog = catalog();
        assert_eq!(
            command_name(resolve(&catalog, &["tag", "delete"]).unwrap()),
            "delete"
        );
    }

    #[test]
    fn resolves_category() {
        let catalog = catalog();
        match resolve(&catalog, &["Math"]) {
            Ok(HelpTarget::Category { name, .. }) => assert_eq!(name, "Math"),
            other => panic!("expected category, got {other:?}"),
        }
    }

    #[test]
    fn category_of_only_hidden_commands_is_not_found() {
        let catalog = catalog();
        assert!(matches!(
            resolve(&catalog, &["Secret"]),
            Err(LookupError::NotFound { .. })
        ));
    }

    #[test]
    fn hidden_command_resolves_by_exact_name() {
        let catalog = catalog();
        assert_eq!(command_name(resolve(&catalog, &["debug"]).unwrap()), "debug");
    }

    #[test]
    fn unknown_command_suggests_close_names() {
        let catalog = catalog();
        let err = resolve(&catalog, &["rol"]).unwrap_err();
        match &err {
            LookupError::NotFound { name, suggestions } => {
                assert_eq!(name, "rol");
                assert_eq!(suggestions.first().map(String::as_str), Some("roll"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(err.to_string().starts_with("No command called \"rol\" found. Did you mean: roll"));
    }

    #[test]
    fn suggestions_skip_hidden() {
        let catalog = catalog();
        let err = resolve(&catalog, &["debu"]).unwrap_err();
        assert_eq!(
            err,
            LookupError::NotFound {
                name: "debu".to_string(),
                suggestions: Vec::new(),
            }
        );
        assert_eq!(err.to_string(), "No command called \"debu\" found.");
    }

    #[test]
    fn leaf_has_no_subcommands() {
        let catalog = catalog();
        let err = resolve(&catalog, &["add", "more"]).unwrap_err();
        assert_eq!(err.to_string(), "Command \"add\" has no subcommands.");
    }

    #[test]
    fn unknown_subcommand() {
        let catalog = catalog();
        let err = resolve(&catalog, &["tag", "creat"]).unwrap_err();
        assert_eq!(
            err,
            LookupError::NoSuchSubcommand {
                parent: "tag".to_string(),
                name: "creat".to_string(),
                suggestions: vec!["create".to_string()],
            }
        );
    }

    #[test]
    fn category_followed_by_words_is_not_found() {
        let catalog = catalog();
        assert!(matches!(
            resolve(&catalog, &["Math", "add"]),
            Err(LookupError::NotFound { .. })
        ));
    }
}
