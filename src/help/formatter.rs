//! Help page formatting.
//!
//! Formatting happens in two steps. [`HelpFormatter::pieces`] gathers the
//! parts of a help page (description, signature, long help, the command
//! listing and the ending note) and a strategy lays them out into pages. The
//! default strategy is [`paginate`]; callers wanting a different layout
//! pass their own through [`HelpFormatter::with_strategy`].

use thiserror::Error;

use super::filter::{filter_visible, group_by_category, in_category, without_aliases, Entry};
use super::pager::PageState;
use super::signature::{command_signature, ending_note};
use super::types::{FormatterConfig, FormattingContext, HelpTarget};
use crate::catalog::CommandMap;
use crate::text::{shorten, text_len};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatterError {
    #[error("page size limit {limit} is too small for fence {fence:?} (needs at least {minimum})")]
    PageLimitTooSmall {
        limit: usize,
        fence: String,
        minimum: usize,
    },
}

/// One command inside a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub summary: String,
    /// The rendered line, already shortened to the line width.
    pub line: String,
}

/// A category header and the commands under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSection {
    pub header: String,
    pub entries: Vec<ListingEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// Root listing, split by category.
    Categories(Vec<ListingSection>),
    /// Flat listing under a `Commands:` header.
    Commands(Vec<ListingEntry>),
}

/// Everything a help page is made of, before layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpPieces {
    pub description: String,
    /// Present when the target is a command.
    pub signature: Option<String>,
    pub help: String,
    /// `None` for a command without subcommands.
    pub listing: Option<Listing>,
    pub ending_note: Option<String>,
}

/// Lays out [`HelpPieces`] into pages.
pub type FormatStrategy = dyn Fn(&HelpPieces, &FormatterConfig) -> Vec<String> + Send + Sync;

pub struct HelpFormatter {
    config: FormatterConfig,
    strategy: Box<FormatStrategy>,
}

impl std::fmt::Debug for HelpFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelpFormatter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HelpFormatter {
    /// Create a formatter with the default pagination strategy.
    ///
    /// Fails if the page limit can't hold an opening and closing fence.
    pub fn new(config: FormatterConfig) -> Result<Self, FormatterError> {
        let minimum = 2 * text_len(&config.page_fence);
        if config.page_size_limit < minimum {
            return Err(FormatterError::PageLimitTooSmall {
                limit: config.page_size_limit,
                fence: config.page_fence.clone(),
                minimum,
            });
        }

        Ok(Self {
            config,
            strategy: Box::new(paginate),
        })
    }

    /// Replace the layout step.
    pub fn with_strategy(
        mut self,
        strategy: impl Fn(&HelpPieces, &FormatterConfig) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Format help for `target` into pages.
    pub fn format(&self, target: HelpTarget<'_>, context: &FormattingContext) -> Vec<String> {
        let pieces = self.pieces(target, context);
        let pages = (self.strategy)(&pieces, &self.config);
        tracing::debug!(pages = pages.len(), "formatted help");
        pages
    }

    /// Gather the parts of the help page for `target`.
    pub fn pieces(&self, target: HelpTarget<'_>, context: &FormattingContext) -> HelpPieces {
        let prefix = context.clean_prefix();
        let mut pieces = HelpPieces {
            description: target.description().to_string(),
            ..HelpPieces::default()
        };

        let listing = match target {
            HelpTarget::Root(catalog) => {
                let width = catalog.commands.max_name_len().unwrap_or(0);
                let visible = self.visible(&catalog.commands, context);
                let sections = group_by_category(visible)
                    .into_iter()
                    .map(|group| ListingSection {
                        header: group.label.to_string(),
                        entries: self.entries(&group.members, width),
                    })
                    .collect();
                Listing::Categories(sections)
            }
            HelpTarget::Category { catalog, name } => {
                let width = catalog.commands.max_name_len().unwrap_or(0);
                let visible = in_category(self.visible(&catalog.commands, context), name);
                Listing::Commands(self.entries(&visible, width))
            }
            HelpTarget::Command(command) => {
                pieces.signature = Some(command_signature(command, &prefix));
                pieces.help = command.help.clone();

                let Some(subcommands) = &command.subcommands else {
                    return pieces;
                };
                let width = subcommands
                    .max_name_len()
                    .unwrap_or_else(|| text_len(&command.name));
                let visible = self.visible(subcommands, context);
                Listing::Commands(self.entries(&visible, width))
            }
        };

        pieces.listing = Some(listing);
        pieces.ending_note = Some(ending_note(&prefix));
        pieces
    }

    fn visible<'a>(&self, commands: &'a CommandMap, context: &FormattingContext) -> Vec<Entry<'a>> {
        without_aliases(filter_visible(commands, &self.config, context.check()))
    }

    fn entries(&self, members: &[Entry<'_>], width: usize) -> Vec<ListingEntry> {
        members
            .iter()
            .map(|(name, command)| {
                let summary = command.summary();
                let line = format!("  {:<width$}  {}", name, summary, width = width);
                ListingEntry {
                    name: name.to_string(),
                    summary: summary.to_string(),
                    line: shorten(&line, self.config.line_width),
                }
            })
            .collect()
    }
}

/// Default layout: fenced pages that roll over once they pass
/// `page_size_limit`.
///
/// Entry lines are appended one at a time so none is ever split between
/// pages. A category header is kept on the same page as its first entry and
/// the ending note is moved whole to a new page when it doesn't fit.
pub fn paginate(pieces: &HelpPieces, config: &FormatterConfig) -> Vec<String> {
    let mut state = PageState::begin(&config.page_fence, config.page_size_limit);

    if !pieces.description.is_empty() {
        state.append_line(&pieces.description);
        state.append_line("");
    }

    if let Some(signature) = &pieces.signature {
        state.append_line(signature);
        state.append_line("");

        if !pieces.help.is_empty() {
            state.append_lines(&[pieces.help.as_str(), ""]);
        }
    }

    let Some(listing) = &pieces.listing else {
        return state.finish();
    };

    match listing {
        Listing::Categories(sections) => {
            for section in sections {
                append_section(&mut state, &section.header, &section.entries);
            }
        }
        Listing::Commands(entries) => append_section(&mut state, "Commands:", entries),
    }

    if let Some(note) = &pieces.ending_note {
        state.append_line("");
        state.reserve(text_len(note) + 1);
        state.append_line(note);
    }

    state.finish()
}

fn append_section(state: &mut PageState, header: &str, entries: &[ListingEntry]) {
    let Some((first, rest)) = entries.split_first() else {
        state.append_line(header);
        return;
    };

    // header and first entry go in as one block so a rollover can't split them
    state.reserve(text_len(header) + 1 + text_len(&first.line) + 1);
    state.append_lines(&[header, first.line.as_str()]);

    for entry in rest {
        state.append_line(&entry.line);
    }
}
