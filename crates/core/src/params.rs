//! Page parameters.
//!
//! Contains the PageParams struct holding the start-of-run defaults that
//! seed every option in the registry.

use crate::error::{Result, SlidesError};

/// Start-of-run defaults for the page options.
///
/// Each field is the initial persisted value of the option with the same
/// name. Directives change the current values; sticky directives change
/// the persisted ones.
#[derive(Debug, Clone, PartialEq)]
pub struct PageParams {
    /// Font family name (e.g. "Helvetica", "Courier", "Times").
    pub font: String,

    /// Style suffix appended to the family ("", "Bold" or "Italic").
    pub style: String,

    /// Font size in points.
    pub size: i32,

    /// Indent uncentered lines by a tenth of the page width instead of a
    /// twentieth.
    pub indent: bool,

    /// Center every line horizontally.
    pub center: bool,

    /// Page height in points.
    pub height: i32,

    /// Page width in points.
    pub width: i32,

    /// Blank border kept around images, in points.
    pub padding: i32,

    /// Scale images to cover the page (true) or to fit inside it (false).
    pub fill: bool,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            font: "Helvetica".to_string(),
            style: String::new(),
            size: 20,
            indent: false,
            center: false,
            height: 300,
            width: 400,
            padding: 0,
            fill: true,
        }
    }
}

impl PageParams {
    /// Creates page parameters with the given geometry and the default
    /// typography.
    ///
    /// Fails when a dimension is not positive or when the padding leaves
    /// no room for content.
    pub fn new(width: i32, height: i32, size: i32, padding: i32) -> Result<Self> {
        let params = Self {
            width,
            height,
            size,
            padding,
            ..Self::default()
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks that the parameters describe a drawable page.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(SlidesError::InvalidParams(format!(
                "page size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.size <= 0 {
            return Err(SlidesError::InvalidParams(format!(
                "font size must be positive, got {}",
                self.size
            )));
        }
        let min_side = i64::from(self.width.min(self.height));
        if self.padding < 0 || 2 * i64::from(self.padding) >= min_side {
            return Err(SlidesError::InvalidParams(format!(
                "padding {} leaves no content area on a {}x{} page",
                self.padding, self.width, self.height
            )));
        }
        Ok(())
    }

    /// Returns a copy with a different font family.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Returns a copy with a different image fill preference.
    pub fn with_fill(mut self, fill: bool) -> Self {
        self.fill = fill;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_builtin_page() {
        let params = PageParams::default();
        assert_eq!(params.width, 400);
        assert_eq!(params.height, 300);
        assert_eq!(params.size, 20);
        assert!(params.fill);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn new_rejects_degenerate_pages() {
        assert!(PageParams::new(0, 300, 20, 0).is_err());
        assert!(PageParams::new(400, 300, 0, 0).is_err());
        assert!(PageParams::new(400, 300, 20, 150).is_err());
        assert!(PageParams::new(400, 300, 20, -1).is_err());
        assert!(matches!(
            PageParams::new(400, 300, 20, 2_000_000_000),
            Err(SlidesError::InvalidParams(_))
        ));
        assert!(PageParams::new(i32::MAX, i32::MAX, 20, i32::MAX).is_err());
        assert!(PageParams::new(800, 600, 30, 10).is_ok());
    }
}
