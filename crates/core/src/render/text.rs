//! Text page rendering.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::glyphs::glyph_name;
use crate::options::PageSettings;

/// Standard 14 PostScript name for a (family, style) pair.
///
/// Families outside the standard set are joined PostScript style, e.g.
/// `Palatino-Bold`.
pub fn font_name(family: &str, style: &str) -> String {
    let standard = match (family, style) {
        ("Helvetica", "") => "Helvetica",
        ("Helvetica", "Bold") => "Helvetica-Bold",
        ("Helvetica", "Italic") => "Helvetica-Oblique",
        ("Courier", "") => "Courier",
        ("Courier", "Bold") => "Courier-Bold",
        ("Courier", "Italic") => "Courier-Oblique",
        ("Times", "") => "Times-Roman",
        ("Times", "Bold") => "Times-Bold",
        ("Times", "Italic") => "Times-Italic",
        (family, "") => return family.to_string(),
        (family, style) => return format!("{family}-{style}"),
    };
    standard.to_string()
}

/// Vertical anchor for a block of `count` rows.
///
/// Odd blocks center on their middle row; even blocks are shifted down
/// half a row so the gap between the two middle rows sits on the page
/// midline.
pub fn baseline(settings: &PageSettings, count: usize) -> i32 {
    let mut base = settings.height / 2;
    if count % 2 == 0 {
        base -= settings.size / 2;
    }
    base
}

/// PostScript that draws `line` at the current point.
///
/// `\`, `(` and `)` are escaped. Characters from the glyph table break
/// the string and are drawn with `glyphshow`. Other non-ASCII or control
/// characters are written as octal escapes of their UTF-8 bytes.
pub fn show_string(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 8);
    out.push('(');
    for c in line.chars() {
        if let Some(name) = glyph_name(c) {
            let _ = write!(out, ") show /{name} glyphshow (");
        } else if matches!(c, '\\' | '(' | ')') {
            out.push('\\');
            out.push(c);
        } else if c.is_ascii() && !c.is_ascii_control() {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                let _ = write!(out, "\\{byte:03o}");
            }
        }
    }
    out.push_str(") show");
    out
}

pub(super) fn write_text_page<W: Write>(
    out: &mut W,
    settings: &PageSettings,
    lines: &[String],
) -> io::Result<()> {
    writeln!(
        out,
        "/{} {} selectfont",
        font_name(&settings.font, &settings.style),
        settings.size
    )?;

    let count = lines.len();
    let base = baseline(settings, count);
    let middle = (count / 2) as i64;
    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let y = i64::from(base) - i64::from(settings.size) * (i as i64 - middle);
        let shown = show_string(line);
        if settings.center {
            // Measure by drawing off page, then center on the page width.
            writeln!(out, "gsave 0 -1000 moveto")?;
            writeln!(out, "{shown}")?;
            writeln!(
                out,
                "currentpoint pop {} exch sub 2 div grestore",
                settings.width
            )?;
            write!(out, "{y} moveto ")?;
        } else {
            let x = if settings.indent {
                settings.width / 10
            } else {
                settings.width / 20
            };
            write!(out, "{x} {y} moveto ")?;
        }
        writeln!(out, "{shown}")?;
    }
    writeln!(out, "showpage")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Registry;

    fn settings() -> PageSettings {
        Registry::default().settings()
    }

    fn page(settings: &PageSettings, lines: &[&str]) -> String {
        let lines: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        write_text_page(&mut out, settings, &lines).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn standard_font_names() {
        assert_eq!(font_name("Helvetica", ""), "Helvetica");
        assert_eq!(font_name("Helvetica", "Italic"), "Helvetica-Oblique");
        assert_eq!(font_name("Times", ""), "Times-Roman");
        assert_eq!(font_name("Courier", "Bold"), "Courier-Bold");
        assert_eq!(font_name("Palatino", "Bold"), "Palatino-Bold");
        assert_eq!(font_name("Palatino", ""), "Palatino");
    }

    #[test]
    fn escapes_string_delimiters() {
        assert_eq!(show_string(r"a(b)\c"), r"(a\(b\)\\c) show");
    }

    #[test]
    fn substitutes_glyphs() {
        assert_eq!(
            show_string("Café"),
            "(Caf) show /eacute glyphshow () show"
        );
    }

    #[test]
    fn unmapped_characters_become_octal() {
        assert_eq!(show_string("a\tb"), r"(a\011b) show");
        assert_eq!(show_string("→"), r"(\342\206\222) show");
    }

    #[test]
    fn single_line_sits_on_midline() {
        let out = page(&settings(), &["Hello"]);
        assert_eq!(
            out,
            "/Helvetica 20 selectfont\n20 150 moveto (Hello) show\nshowpage\n"
        );
    }

    #[test]
    fn even_block_is_shifted_half_a_row() {
        let out = page(&settings(), &["a", "b"]);
        // base = 150 - 10; rows at base + 20 and base
        assert!(out.contains("20 160 moveto (a) show\n"));
        assert!(out.contains("20 140 moveto (b) show\n"));
    }

    #[test]
    fn empty_rows_reserve_space() {
        let out = page(&settings(), &["a", "", "c"]);
        assert!(out.contains("20 170 moveto (a) show\n"));
        assert!(out.contains("20 130 moveto (c) show\n"));
        assert_eq!(out.matches("moveto").count(), 2);
    }

    #[test]
    fn indent_moves_left_margin() {
        let mut s = settings();
        s.indent = true;
        let out = page(&s, &["x"]);
        assert!(out.contains("40 150 moveto (x) show\n"));
    }

    #[test]
    fn centered_lines_measure_first() {
        let mut s = settings();
        s.center = true;
        let out = page(&s, &["Mid"]);
        assert_eq!(
            out,
            "/Helvetica 20 selectfont\n\
             gsave 0 -1000 moveto\n\
             (Mid) show\n\
             currentpoint pop 400 exch sub 2 div grestore\n\
             150 moveto (Mid) show\n\
             showpage\n"
        );
    }
}
