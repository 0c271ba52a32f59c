//! slides - compile line-oriented slide markup into PostScript pages.
//!
//! Blocks of text separated by blank lines become pages. Lines starting
//! with `#+` are directives that change the font, size, layout or page
//! geometry, or place an image on the page.

pub mod classify;
pub mod compiler;
pub mod directive;
pub mod document;
pub mod error;
pub mod glyphs;
pub mod options;
pub mod params;
pub mod raster;
pub mod render;

pub use compiler::{CompileSummary, Compiler, compile, compile_str};
pub use error::{Diagnostic, Result, SlidesError};
pub use options::{PageSettings, Registry};
pub use params::PageParams;
