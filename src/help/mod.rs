//! Paginated help output.
//!
//! Turns a command catalog into a sequence of fenced pages that each stay
//! under a size budget, suitable for chat messages or terminal panes.
//!
//! # Architecture
//!
//! - `types`: Formatter settings, invocation context and help targets
//! - `check`: Authorization checks supplied by the host
//! - `filter`: Visibility filtering and category grouping
//! - `signature`: Usage lines and the ending note
//! - `prefix`: Mention cleanup for the invocation prefix
//! - `pager`: Page accumulator
//! - `formatter`: Assembles help pieces and lays them out into pages

mod check;
mod filter;
mod formatter;
mod pager;
mod prefix;
mod signature;
mod types;

pub use check::{AllowAll, CheckFailure, CommandCheck, RoleCheck};
pub use filter::{filter_visible, group_by_category, is_alias_entry, CategoryGroup, CategoryLabel, Entry};
pub use formatter::{
    paginate, FormatStrategy, FormatterError, HelpFormatter, HelpPieces, Listing, ListingEntry,
    ListingSection,
};
pub use pager::PageState;
pub use prefix::resolve_display_prefix;
pub use signature::{command_signature, ending_note};
pub use types::{BotIdentity, FormatterConfig, FormattingContext, HelpTarget};
