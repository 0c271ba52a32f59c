//! Glyph substitution table.
//!
//! The standard PostScript fonts use StandardEncoding, which has no code
//! points for accented Latin letters and a few typographic symbols. Those
//! characters are drawn by name with `glyphshow` instead. Names follow the
//! Adobe Glyph List.

use std::collections::HashMap;
use std::sync::LazyLock;

/// A substitution row: (character, Adobe glyph name).
pub type GlyphRow = (char, &'static str);

/// Characters drawn with `glyphshow` rather than inside a string literal.
pub const GLYPHS: &[GlyphRow] = &[
    // Uppercase Latin-1
    ('À', "Agrave"),
    ('Á', "Aacute"),
    ('Â', "Acircumflex"),
    ('Ã', "Atilde"),
    ('Ä', "Adieresis"),
    ('Å', "Aring"),
    ('Æ', "AE"),
    ('Ç', "Ccedilla"),
    ('È', "Egrave"),
    ('É', "Eacute"),
    ('Ê', "Ecircumflex"),
    ('Ë', "Edieresis"),
    ('Ì', "Igrave"),
    ('Í', "Iacute"),
    ('Î', "Icircumflex"),
    ('Ï', "Idieresis"),
    ('Ñ', "Ntilde"),
    ('Ò', "Ograve"),
    ('Ó', "Oacute"),
    ('Ô', "Ocircumflex"),
    ('Õ', "Otilde"),
    ('Ö', "Odieresis"),
    ('Ø', "Oslash"),
    ('Ù', "Ugrave"),
    ('Ú', "Uacute"),
    ('Û', "Ucircumflex"),
    ('Ü', "Udieresis"),
    ('Ý', "Yacute"),
    ('Œ', "OE"),
    // Lowercase Latin-1
    ('à', "agrave"),
    ('á', "aacute"),
    ('â', "acircumflex"),
    ('ã', "atilde"),
    ('ä', "adieresis"),
    ('å', "aring"),
    ('æ', "ae"),
    ('ç', "ccedilla"),
    ('è', "egrave"),
    ('é', "eacute"),
    ('ê', "ecircumflex"),
    ('ë', "edieresis"),
    ('ì', "igrave"),
    ('í', "iacute"),
    ('î', "icircumflex"),
    ('ï', "idieresis"),
    ('ñ', "ntilde"),
    ('ò', "ograve"),
    ('ó', "oacute"),
    ('ô', "ocircumflex"),
    ('õ', "otilde"),
    ('ö', "odieresis"),
    ('ø', "oslash"),
    ('ù', "ugrave"),
    ('ú', "uacute"),
    ('û', "ucircumflex"),
    ('ü', "udieresis"),
    ('ý', "yacute"),
    ('ÿ', "ydieresis"),
    ('ß', "germandbls"),
    ('œ', "oe"),
    // Symbols
    ('€', "Euro"),
    ('£', "sterling"),
    ('§', "section"),
    ('©', "copyright"),
    ('®', "registered"),
    ('°', "degree"),
    ('«', "guillemotleft"),
    ('»', "guillemotright"),
    ('–', "endash"),
    ('—', "emdash"),
    ('…', "ellipsis"),
    ('‘', "quoteleft"),
    ('’', "quoteright"),
    ('“', "quotedblleft"),
    ('”', "quotedblright"),
    ('•', "bullet"),
];

static GLYPH_NAMES: LazyLock<HashMap<char, &'static str>> =
    LazyLock::new(|| GLYPHS.iter().copied().collect());

/// Return the glyph name used to draw `c`, if it needs substitution.
pub fn glyph_name(c: char) -> Option<&'static str> {
    GLYPH_NAMES.get(&c).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accented_letters_have_names() {
        assert_eq!(glyph_name('é'), Some("eacute"));
        assert_eq!(glyph_name('Ü'), Some("Udieresis"));
        assert_eq!(glyph_name('ß'), Some("germandbls"));
        assert_eq!(glyph_name('€'), Some("Euro"));
    }

    #[test]
    fn ascii_is_never_substituted() {
        assert!((' '..='~').all(|c| glyph_name(c).is_none()));
    }

    #[test]
    fn table_has_no_duplicate_characters() {
        assert_eq!(GLYPH_NAMES.len(), GLYPHS.len());
    }
}
