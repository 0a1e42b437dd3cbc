//! Text wrapping utilities.

use textwrap::{Options, WrapAlgorithm};

fn options<'a>(width: usize) -> Options<'a> {
    // Greedy fill, so the first line of `shorten` is as full as possible.
    Options::new(width.max(1)).wrap_algorithm(WrapAlgorithm::FirstFit)
}

/// Length of `text` in chars, the unit used for page budgets and name padding.
pub fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Wrap text to `width` columns without splitting words.
///
/// A single word wider than `width` is hard-split. Leading indentation on the
/// first line is kept and embedded newlines always start a new line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(text, options(width))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Shorten text to a single wrapped line, dropping everything after it.
///
/// No ellipsis is added; callers that want a truncation marker add their own.
pub fn shorten(text: &str, width: usize) -> String {
    textwrap::wrap(text, options(width))
        .into_iter()
        .next()
        .map(|line| line.into_owned())
        .unwrap_or_default()
}
