//! Document state: what has been accumulated for the page being built.

use crate::raster::PageImage;

/// Content accumulated for the next page plus the source line counter.
#[derive(Debug, Clone)]
pub struct Document {
    /// Pending text lines in source order. Empty strings reserve a row.
    lines: Vec<String>,
    /// Pending image; wins over `lines` when both are set.
    image: Option<PageImage>,
    /// 1-based number of the source line being processed.
    line: usize,
    /// Whether anything was accumulated since the last flush.
    page_open: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document positioned at source line 1.
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            image: None,
            line: 1,
            page_open: false,
        }
    }

    /// Append a content line to the pending page.
    pub fn push_line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
        self.page_open = true;
    }

    /// Replace the pending image.
    pub fn set_image(&mut self, image: PageImage) {
        self.image = Some(image);
        self.page_open = true;
    }

    /// Drop the pending image, keeping any pending lines.
    pub fn clear_image(&mut self) {
        self.image = None;
    }

    /// Record that a directive touched the pending page.
    pub fn mark_open(&mut self) {
        self.page_open = true;
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn image(&self) -> Option<&PageImage> {
        self.image.as_ref()
    }

    /// Current source line number, for diagnostics.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Advance the source line counter.
    pub fn next_line(&mut self) {
        self.line += 1;
    }

    pub fn is_open(&self) -> bool {
        self.page_open
    }

    /// Whether a flush would produce a page.
    pub fn has_content(&self) -> bool {
        self.image.is_some() || !self.lines.is_empty()
    }

    /// Forget the pending page. The line counter keeps counting.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.image = None;
        self.page_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_open_the_page() {
        let mut doc = Document::new();
        assert!(!doc.is_open());
        assert!(!doc.has_content());

        doc.push_line("Hello");
        doc.push_line("");
        assert!(doc.is_open());
        assert!(doc.has_content());
        assert_eq!(doc.lines(), ["Hello", ""]);
    }

    #[test]
    fn clear_keeps_line_counter() {
        let mut doc = Document::new();
        doc.push_line("a");
        doc.next_line();
        doc.next_line();
        doc.clear();
        assert_eq!(doc.line(), 3);
        assert!(doc.lines().is_empty());
        assert!(!doc.is_open());
    }

    #[test]
    fn directive_opens_page_without_content() {
        let mut doc = Document::new();
        doc.mark_open();
        assert!(doc.is_open());
        assert!(!doc.has_content());
    }
}
