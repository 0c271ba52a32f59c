//! Slide compiler - page lifecycle and the high-level API.
//!
//! Provides:
//! - `Compiler` - feed source lines one at a time, pages are written as
//!   blank lines close them
//! - `compile()` - compile a whole reader into a writer

use std::borrow::Cow;
use std::io::{BufRead, ErrorKind, Write};

use tracing::{info, warn};

use crate::classify::{LineKind, classify};
use crate::directive::apply;
use crate::document::Document;
use crate::error::{Diagnostic, Result, SlidesError};
use crate::options::Registry;
use crate::params::PageParams;
use crate::render::PostScriptWriter;

/// Outcome of a finished compilation.
#[derive(Debug)]
pub struct CompileSummary {
    /// Pages written to the output.
    pub pages: usize,
    /// Recoverable problems, in source order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Line-at-a-time slide compiler.
///
/// A page is open from the first content line or directive after a flush
/// until the next blank line (or [`Compiler::finish`]). Flushing renders
/// the page if it has content, then restores every option to its
/// persisted value.
pub struct Compiler<W: Write> {
    registry: Registry,
    document: Document,
    writer: PostScriptWriter<W>,
    diagnostics: Vec<Diagnostic>,
}

impl<W: Write> Compiler<W> {
    /// Create a compiler and write the PostScript preamble.
    pub fn new(out: W, params: &PageParams) -> Result<Self> {
        params.validate()?;
        let registry = Registry::new(params);
        let mut writer = PostScriptWriter::new(out);
        writer.write_preamble(&registry.settings())?;
        Ok(Self {
            registry,
            document: Document::new(),
            writer,
            diagnostics: Vec::new(),
        })
    }

    /// Process one source line.
    ///
    /// Only output errors are returned; everything else is recorded as a
    /// diagnostic.
    pub fn feed_line(&mut self, raw: &str) -> Result<()> {
        match classify(raw) {
            LineKind::Blank => {
                self.flush()?;
            }
            LineKind::Literal(text) | LineKind::Text(text) => self.document.push_line(text),
            LineKind::Directive(directive) => {
                if let Err(err) = apply(&directive, &mut self.registry, &mut self.document) {
                    self.report(err)?;
                }
            }
            LineKind::Comment => {}
        }
        self.document.next_line();
        Ok(())
    }

    /// Close the current page.
    ///
    /// Returns whether a page was written. A flush with no open page does
    /// nothing; an open page without content writes nothing but still
    /// resets the options.
    pub fn flush(&mut self) -> Result<bool> {
        if !self.document.is_open() {
            return Ok(false);
        }
        let rendered = self
            .writer
            .render_page(&self.registry.settings(), &self.document)?;
        self.registry.reset_all(&mut self.document);
        self.document.clear();
        Ok(rendered)
    }

    /// Flush the last page and the output.
    pub fn finish(mut self) -> Result<CompileSummary> {
        self.flush()?;
        self.writer.flush()?;
        let pages = self.writer.pages_written();
        info!(pages, warnings = self.diagnostics.len(), "compilation finished");
        Ok(CompileSummary {
            pages,
            diagnostics: self.diagnostics,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Pages written so far.
    pub fn pages(&self) -> usize {
        self.writer.pages_written()
    }

    fn report(&mut self, error: SlidesError) -> Result<()> {
        if !error.is_recoverable() {
            return Err(error);
        }
        let line = self.document.line();
        warn!(line, "{}", error);
        self.diagnostics.push(Diagnostic { line, error });
        Ok(())
    }
}

/// Compile slide markup from `input` into PostScript on `output`.
///
/// Lines that are not valid UTF-8 are decoded lossily, with U+FFFD in
/// place of bad bytes. A read error stops reading; it is reported as a
/// diagnostic and the page accumulated so far is still written.
///
/// # Example
/// ```
/// use slides_core::{compile, PageParams};
///
/// # fn main() -> slides_core::Result<()> {
/// let mut out = Vec::new();
/// let summary = compile("Hello\n".as_bytes(), &mut out, &PageParams::default())?;
/// assert_eq!(summary.pages, 1);
/// # Ok(())
/// # }
/// ```
pub fn compile<R: BufRead, W: Write>(
    mut input: R,
    output: W,
    params: &PageParams,
) -> Result<CompileSummary> {
    let mut compiler = Compiler::new(output, params)?;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match input.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                let text = String::from_utf8_lossy(&buf);
                if let Cow::Owned(_) = text {
                    warn!(line = compiler.document.line(), "invalid UTF-8 replaced");
                }
                compiler.feed_line(&text)?;
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(source) => {
                let line = compiler.document.line();
                compiler.report(SlidesError::InputRead { line, source })?;
                break;
            }
        }
    }
    compiler.finish()
}

/// Compile a string and return the PostScript as a string.
pub fn compile_str(source: &str, params: &PageParams) -> Result<(String, CompileSummary)> {
    let mut out = Vec::new();
    let summary = compile(source.as_bytes(), &mut out, params)?;
    Ok((String::from_utf8_lossy(&out).into_owned(), summary))
}
