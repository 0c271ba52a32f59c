//! Option registry.
//!
//! Every directive name maps to one [`Setting`]. A setting holds a current
//! value, used for the page being built, and a persisted value, restored
//! when a page is flushed. Sticky directives promote the current value to
//! the persisted one.

use indexmap::IndexMap;
use tracing::debug;

use crate::document::Document;
use crate::error::{Result, SlidesError};
use crate::params::PageParams;
use crate::raster::PageImage;

/// Keyword to canonical value pairs, or (target option, value) pairs for
/// aggregates.
pub type PairTable = &'static [(&'static str, &'static str)];

/// Font family keywords.
pub const FONT_FAMILIES: PairTable = &[
    ("sans", "Helvetica"),
    ("mono", "Courier"),
    ("serif", "Times"),
];

/// Font style keywords.
pub const FONT_STYLES: PairTable = &[("bold", "Bold"), ("italic", "Italic")];

/// `#+title` sets all of these at once.
pub const TITLE: PairTable = &[("center", "t"), ("style", "bold"), ("size", "large")];

/// A value with a page-local current state and a persisted default.
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar<T> {
    current: T,
    persisted: T,
}

impl<T: Clone> Scalar<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: value.clone(),
            persisted: value,
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn persisted(&self) -> &T {
        &self.persisted
    }

    pub fn set_value(&mut self, value: T) {
        self.current = value;
    }

    /// Restore the persisted value.
    pub fn reset(&mut self) {
        self.current = self.persisted.clone();
    }

    /// Make the current value the new persisted value.
    pub fn push(&mut self) {
        self.persisted = self.current.clone();
    }
}

/// One registered option.
#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    /// Integer parsed from the directive value; values below `min` are
    /// rejected.
    Int { value: Scalar<i32>, min: i32 },
    /// True for any non-empty value.
    Bool(Scalar<bool>),
    /// Text chosen from a keyword table; unknown keywords select `fallback`.
    Keyword {
        value: Scalar<String>,
        table: PairTable,
        fallback: &'static str,
    },
    /// Font size derived from the page height active when it is set.
    Size(Scalar<i32>),
    /// Sets each target option to its paired value.
    Aggregate(PairTable),
    /// Loads an image into the document. Never persisted.
    Image,
}

/// Map a size keyword to points for a page of the given height.
pub fn size_for_keyword(keyword: &str, height: i32) -> i32 {
    match keyword {
        "huge" => height / 6,
        "large" => height / 10,
        "small" => height / 25,
        "tiny" => height / 30,
        _ => height / 15,
    }
}

fn lookup_keyword(table: PairTable, fallback: &'static str, raw: &str) -> &'static str {
    let raw = raw.to_lowercase();
    table
        .iter()
        .find(|(keyword, _)| *keyword == raw)
        .map_or(fallback, |&(_, value)| value)
}

/// Current option values, as read by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSettings {
    pub font: String,
    pub style: String,
    pub size: i32,
    pub indent: bool,
    pub center: bool,
    pub height: i32,
    pub width: i32,
    pub padding: i32,
    pub fill: bool,
}

/// Fixed name to option mapping, populated once from [`PageParams`].
#[derive(Debug, Clone)]
pub struct Registry {
    settings: IndexMap<&'static str, Setting>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(&PageParams::default())
    }
}

impl Registry {
    /// Build the registry with every option persisted at its `params`
    /// value.
    pub fn new(params: &PageParams) -> Self {
        let mut settings = IndexMap::new();
        settings.insert(
            "font",
            Setting::Keyword {
                value: Scalar::new(params.font.clone()),
                table: FONT_FAMILIES,
                fallback: "Helvetica",
            },
        );
        settings.insert(
            "style",
            Setting::Keyword {
                value: Scalar::new(params.style.clone()),
                table: FONT_STYLES,
                fallback: "",
            },
        );
        settings.insert("size", Setting::Size(Scalar::new(params.size)));
        settings.insert("center", Setting::Bool(Scalar::new(params.center)));
        settings.insert("indent", Setting::Bool(Scalar::new(params.indent)));
        settings.insert(
            "height",
            Setting::Int {
                value: Scalar::new(params.height),
                min: 1,
            },
        );
        settings.insert(
            "width",
            Setting::Int {
                value: Scalar::new(params.width),
                min: 1,
            },
        );
        settings.insert(
            "padding",
            Setting::Int {
                value: Scalar::new(params.padding),
                min: 0,
            },
        );
        settings.insert("fill", Setting::Bool(Scalar::new(params.fill)));
        settings.insert("image", Setting::Image);
        settings.insert("title", Setting::Aggregate(TITLE));
        Self { settings }
    }

    /// Look up an option by name, ignoring case.
    pub fn resolve(&self, name: &str) -> Option<&Setting> {
        self.settings.get(name.to_lowercase().as_str())
    }

    /// Registered option names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.settings.keys().copied()
    }

    /// Apply `raw` to the named option.
    ///
    /// On error the option keeps its previous value; for `image` the
    /// previously loaded image is kept too.
    pub fn set(&mut self, name: &str, raw: &str, doc: &mut Document) -> Result<()> {
        let line = doc.line();
        let height = self.int("height");
        let Some(setting) = self.settings.get_mut(name.to_lowercase().as_str()) else {
            return Err(SlidesError::UnknownDirective {
                name: name.to_string(),
                line,
            });
        };
        match setting {
            Setting::Int { value, min } => match raw.trim().parse::<i32>() {
                Ok(parsed) if parsed >= *min => value.set_value(parsed),
                _ => {
                    return Err(SlidesError::InvalidInteger {
                        value: raw.to_string(),
                        line,
                    });
                }
            },
            Setting::Bool(value) => value.set_value(!raw.is_empty()),
            Setting::Keyword {
                value,
                table,
                fallback,
            } => value.set_value(lookup_keyword(*table, *fallback, raw).to_string()),
            Setting::Size(value) => value.set_value(size_for_keyword(raw, height)),
            Setting::Image => doc.set_image(PageImage::open(raw)?),
            Setting::Aggregate(targets) => {
                let targets = *targets;
                for (target, value) in targets {
                    self.set(target, value, doc)?;
                }
            }
        }
        Ok(())
    }

    /// Restore the named option to its persisted value.
    pub fn reset(&mut self, name: &str, doc: &mut Document) {
        let Some(setting) = self.settings.get_mut(name.to_lowercase().as_str()) else {
            return;
        };
        match setting {
            Setting::Int { value, .. } | Setting::Size(value) => value.reset(),
            Setting::Bool(value) => value.reset(),
            Setting::Keyword { value, .. } => value.reset(),
            Setting::Image => doc.clear_image(),
            Setting::Aggregate(targets) => {
                let targets = *targets;
                for (target, _) in targets {
                    self.reset(target, doc);
                }
            }
        }
    }

    /// Persist the named option's current value.
    pub fn push(&mut self, name: &str) {
        let Some(setting) = self.settings.get_mut(name.to_lowercase().as_str()) else {
            return;
        };
        match setting {
            Setting::Int { value, .. } | Setting::Size(value) => value.push(),
            Setting::Bool(value) => value.push(),
            Setting::Keyword { value, .. } => value.push(),
            Setting::Image => {}
            Setting::Aggregate(targets) => {
                let targets = *targets;
                for (target, _) in targets {
                    self.push(target);
                }
            }
        }
        debug!(option = name, "persisted option value");
    }

    /// Restore every option to its persisted value.
    pub fn reset_all(&mut self, doc: &mut Document) {
        let names: Vec<&'static str> = self.names().collect();
        for name in names {
            self.reset(name, doc);
        }
    }

    /// Snapshot of the current values.
    pub fn settings(&self) -> PageSettings {
        PageSettings {
            font: self.text("font"),
            style: self.text("style"),
            size: self.int("size"),
            indent: self.flag("indent"),
            center: self.flag("center"),
            height: self.int("height"),
            width: self.int("width"),
            padding: self.int("padding"),
            fill: self.flag("fill"),
        }
    }

    fn int(&self, name: &str) -> i32 {
        match self.settings.get(name) {
            Some(Setting::Int { value, .. } | Setting::Size(value)) => *value.current(),
            _ => 0,
        }
    }

    fn flag(&self, name: &str) -> bool {
        matches!(self.settings.get(name), Some(Setting::Bool(value)) if *value.current())
    }

    fn text(&self, name: &str) -> String {
        match self.settings.get(name) {
            Some(Setting::Keyword { value, .. }) => value.current().clone(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Registry, Document) {
        (Registry::default(), Document::new())
    }

    #[test]
    fn scalar_push_and_reset() {
        let mut size = Scalar::new(20);
        size.set_value(30);
        assert_eq!((*size.current(), *size.persisted()), (30, 20));
        size.push();
        size.set_value(40);
        size.reset();
        assert_eq!((*size.current(), *size.persisted()), (30, 30));
    }

    #[test]
    fn resolve_ignores_case() {
        let (reg, _) = setup();
        assert!(reg.resolve("FONT").is_some());
        assert!(reg.resolve("Title").is_some());
        assert!(reg.resolve("bogus").is_none());
    }

    #[test]
    fn keyword_maps_and_falls_back() {
        let (mut reg, mut doc) = setup();
        reg.set("font", "mono", &mut doc).unwrap();
        assert_eq!(reg.settings().font, "Courier");
        reg.set("font", "Serif", &mut doc).unwrap();
        assert_eq!(reg.settings().font, "Times");
        reg.set("font", "comic", &mut doc).unwrap();
        assert_eq!(reg.settings().font, "Helvetica");
        reg.set("style", "wavy", &mut doc).unwrap();
        assert_eq!(reg.settings().style, "");
    }

    #[test]
    fn invalid_integer_keeps_value() {
        let (mut reg, mut doc) = setup();
        reg.set("padding", "12", &mut doc).unwrap();
        let err = reg.set("padding", "twelve", &mut doc).unwrap_err();
        assert!(matches!(
            err,
            SlidesError::InvalidInteger { ref value, line: 1 } if value == "twelve"
        ));
        assert_eq!(reg.settings().padding, 12);
    }

    #[test]
    fn non_positive_height_is_rejected() {
        let (mut reg, mut doc) = setup();
        assert!(reg.set("height", "0", &mut doc).is_err());
        assert_eq!(reg.settings().height, 300);
    }

    #[test]
    fn size_uses_height_at_set_time() {
        let (mut reg, mut doc) = setup();
        reg.set("size", "huge", &mut doc).unwrap();
        assert_eq!(reg.settings().size, 50);

        reg.set("height", "600", &mut doc).unwrap();
        assert_eq!(reg.settings().size, 50);
        reg.set("size", "huge", &mut doc).unwrap();
        assert_eq!(reg.settings().size, 100);
        reg.set("size", "whatever", &mut doc).unwrap();
        assert_eq!(reg.settings().size, 40);
    }

    #[test]
    fn bool_is_true_for_any_value() {
        let (mut reg, mut doc) = setup();
        reg.set("center", "t", &mut doc).unwrap();
        assert!(reg.settings().center);
        reg.set("center", "", &mut doc).unwrap();
        assert!(!reg.settings().center);
    }

    #[test]
    fn title_fans_out() {
        let (mut reg, mut doc) = setup();
        reg.set("title", "ignored", &mut doc).unwrap();
        let s = reg.settings();
        assert!(s.center);
        assert_eq!(s.style, "Bold");
        assert_eq!(s.size, 30);

        reg.reset_all(&mut doc);
        assert_eq!(reg.settings(), Registry::default().settings());
    }

    #[test]
    fn push_survives_reset() {
        let (mut reg, mut doc) = setup();
        reg.set("indent", "yes", &mut doc).unwrap();
        reg.push("indent");
        reg.set("font", "mono", &mut doc).unwrap();
        reg.reset_all(&mut doc);

        let s = reg.settings();
        assert!(s.indent);
        assert_eq!(s.font, "Helvetica");
    }

    #[test]
    fn reset_without_set_is_harmless() {
        let (mut reg, mut doc) = setup();
        let before = reg.settings();
        reg.reset_all(&mut doc);
        assert_eq!(reg.settings(), before);
    }

    #[test]
    fn unknown_name_reports_line() {
        let (mut reg, mut doc) = setup();
        doc.next_line();
        let err = reg.set("bogus", "x", &mut doc).unwrap_err();
        assert!(matches!(err, SlidesError::UnknownDirective { line: 2, .. }));
    }

    #[test]
    fn failed_image_keeps_previous_image() {
        let (mut reg, mut doc) = setup();
        let img = image::RgbImage::new(2, 2);
        doc.set_image(PageImage::from_dynamic(image::DynamicImage::ImageRgb8(img)));

        assert!(reg.set("image", "/nonexistent/pic.png", &mut doc).is_err());
        assert!(doc.image().is_some());

        reg.reset_all(&mut doc);
        assert!(doc.image().is_none());
    }
}
