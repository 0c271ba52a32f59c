//! PostScript page renderer.
//!
//! Turns the accumulated document plus the current option values into
//! absolute PostScript drawing commands:
//! - text pages: one `moveto`/`show` per non-empty line
//! - image pages: one `colorimage` fed with hex-encoded RGB rows

mod pixels;
mod text;

use std::io::{self, Write};

use tracing::debug;

use crate::document::Document;
use crate::options::PageSettings;

pub use pixels::{Placement, hex_rows};
pub use text::{baseline, font_name, show_string};

/// PostScript output writer.
///
/// Pages are landscape: the preamble's `newpage` procedure swaps the
/// device page size and rotates the coordinate system so that `width`
/// runs along the long edge.
pub struct PostScriptWriter<W: Write> {
    out: W,
    pages: usize,
}

impl<W: Write> PostScriptWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, pages: 0 }
    }

    /// Write the document header defining `newpage`.
    pub fn write_preamble(&mut self, settings: &PageSettings) -> io::Result<()> {
        writeln!(self.out, "%!PS")?;
        writeln!(self.out, "/height {} def", settings.height)?;
        writeln!(self.out, "/width {} def", settings.width)?;
        writeln!(self.out, "/newpage {{")?;
        writeln!(
            self.out,
            "    << /PageSize [height width] /Orientation 3 >> setpagedevice"
        )?;
        writeln!(self.out, "    90 rotate")?;
        writeln!(self.out, "    0 height neg translate")?;
        writeln!(self.out, "}} def")
    }

    /// Render one page from the pending content.
    ///
    /// The image wins when both an image and lines are pending. Returns
    /// false, writing nothing, when there is no content at all.
    pub fn render_page(&mut self, settings: &PageSettings, doc: &Document) -> io::Result<bool> {
        if !doc.has_content() {
            return Ok(false);
        }

        writeln!(self.out, "/width {} def", settings.width)?;
        writeln!(self.out, "/height {} def", settings.height)?;
        writeln!(self.out, "newpage")?;

        match doc.image() {
            Some(image) => pixels::write_image_page(&mut self.out, settings, image)?,
            None => text::write_text_page(&mut self.out, settings, doc.lines())?,
        }

        self.pages += 1;
        debug!(page = self.pages, line = doc.line(), "rendered page");
        Ok(true)
    }

    /// Number of pages rendered so far.
    pub fn pages_written(&self) -> usize {
        self.pages
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
