//! Page accumulator for size-limited output.
//!
//! A [`PageState`] is created by [`PageState::begin`] for one formatting run,
//! threaded through the append calls and consumed by [`PageState::finish`].
//! Every page starts and ends with the fence line, and a page is closed as
//! soon as its running size goes over the limit.

use crate::text::text_len;

/// In-progress pagination for one formatting run.
#[derive(Debug, Clone)]
pub struct PageState {
    fence: String,
    limit: usize,
    pages: Vec<String>,
    current_page_lines: Vec<String>,
    running_size: usize,
}

impl PageState {
    /// Start the first page with an opening fence.
    pub fn begin(fence: &str, limit: usize) -> Self {
        Self {
            fence: fence.to_string(),
            limit,
            pages: Vec::new(),
            current_page_lines: vec![fence.to_string()],
            running_size: Self::opening_size(fence),
        }
    }

    /// Size of a fresh page: the fence plus its line break.
    fn opening_size(fence: &str) -> usize {
        text_len(fence) + 1
    }

    /// Append one line (which may itself contain line breaks), then close the
    /// page if it went over the limit.
    pub fn append_line(&mut self, text: &str) {
        self.running_size += text_len(text) + 1;
        self.current_page_lines.push(text.to_string());
        self.rollover_check();
    }

    /// Append several lines as one block with a single rollover check at the
    /// end, so the block is never split.
    pub fn append_lines(&mut self, lines: &[&str]) {
        for line in lines {
            self.running_size += text_len(line) + 1;
            self.current_page_lines.push(line.to_string());
        }
        self.rollover_check();
    }

    /// Close the current page if it is over the limit.
    pub fn rollover_check(&mut self) {
        if self.running_size > self.limit && self.has_content() {
            self.close_page();
        }
    }

    /// Start a new page now unless `len` more chars still fit on this one.
    ///
    /// An empty page is never closed, so something that can't fit anywhere
    /// goes onto a fresh page and overflows it.
    pub fn reserve(&mut self, len: usize) {
        if self.has_content() && self.running_size + len > self.limit {
            self.close_page();
        }
    }

    /// Whether anything besides the opening fence is on the current page.
    pub fn has_content(&self) -> bool {
        self.current_page_lines.len() > 1
    }

    pub fn running_size(&self) -> usize {
        self.running_size
    }

    /// Pages closed so far.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Flush the last page, if it has content, and return all pages.
    pub fn finish(mut self) -> Vec<String> {
        if self.has_content() {
            self.close_page();
        }
        self.pages
    }

    fn close_page(&mut self) {
        self.current_page_lines.push(self.fence.clone());
        let page = self.current_page_lines.join("\n");
        tracing::debug!(
            page = self.pages.len() + 1,
            size = text_len(&page),
            limit = self.limit,
            "page closed"
        );
        self.pages.push(page);
        self.current_page_lines = vec![self.fence.clone()];
        self.running_size = Self::opening_size(&self.fence);
    }
}
