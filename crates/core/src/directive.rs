//! Directive parsing and interpretation.
//!
//! A directive line looks like `#+name[!][:] value`. The optional `!`
//! makes the new value sticky: it becomes the default restored after
//! every following page instead of lasting for the current page only.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::document::Document;
use crate::error::{Result, SlidesError};
use crate::options::{Registry, Setting};

static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#\+([[:alpha:]]*)(!)?:?[[:space:]]*(.*?)[[:space:]]*$")
        .expect("directive pattern is valid")
});

/// A directive line split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub sticky: bool,
    /// Value with surrounding whitespace removed, case preserved.
    pub value: String,
}

impl Directive {
    /// Split a `#+` line. Returns None when the line is not a directive.
    pub fn parse(line: &str) -> Option<Self> {
        let caps = DIRECTIVE_RE.captures(line)?;
        Some(Self {
            name: caps[1].to_string(),
            sticky: caps.get(2).is_some(),
            value: caps[3].to_string(),
        })
    }
}

/// Apply a directive to the registry.
///
/// Unknown names leave everything untouched. The value is lowercased
/// before it is handed to the option, except for `image` where it is a
/// file path.
pub fn apply(directive: &Directive, registry: &mut Registry, doc: &mut Document) -> Result<()> {
    let is_image = match registry.resolve(&directive.name) {
        Some(setting) => matches!(setting, Setting::Image),
        None => {
            return Err(SlidesError::UnknownDirective {
                name: directive.name.clone(),
                line: doc.line(),
            });
        }
    };
    doc.mark_open();

    let value = if is_image {
        directive.value.clone()
    } else {
        directive.value.to_lowercase()
    };
    registry.set(&directive.name, &value, doc)?;
    if directive.sticky {
        registry.push(&directive.name);
    }
    debug!(
        name = %directive.name,
        sticky = directive.sticky,
        line = doc.line(),
        "applied directive"
    );
    Ok(())
}
