//! Input line classification.

use crate::directive::Directive;

/// What a single source line means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only: ends the current page.
    Blank,
    /// `\text`: content taken literally, without the backslash.
    Literal(&'a str),
    /// `#+name...`: changes an option.
    Directive(Directive),
    /// `#...`: ignored.
    Comment,
    /// Any other line: content.
    Text(&'a str),
}

/// Classify one raw line. Trailing whitespace is dropped first.
pub fn classify(raw: &str) -> LineKind<'_> {
    let line = raw.trim_end();
    if line.is_empty() {
        return LineKind::Blank;
    }
    if let Some(rest) = line.strip_prefix('\\') {
        return LineKind::Literal(rest);
    }
    if line.starts_with("#+") {
        return match Directive::parse(line) {
            Some(directive) => LineKind::Directive(directive),
            None => LineKind::Comment,
        };
    }
    if line.starts_with('#') {
        return LineKind::Comment;
    }
    LineKind::Text(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("  \t\r"), LineKind::Blank);
    }

    #[test]
    fn escaped_lines_are_literal() {
        assert_eq!(classify("\\#+size:huge"), LineKind::Literal("#+size:huge"));
        assert_eq!(classify("\\\\path"), LineKind::Literal("\\path"));
        assert_eq!(classify("\\"), LineKind::Literal(""));
    }

    #[test]
    fn directives_and_comments() {
        match classify("#+center!: t") {
            LineKind::Directive(d) => {
                assert_eq!(d.name, "center");
                assert!(d.sticky);
            }
            other => panic!("expected directive, got {:?}", other),
        }
        assert_eq!(classify("# a note"), LineKind::Comment);
        assert_eq!(classify("#"), LineKind::Comment);
    }

    #[test]
    fn text_keeps_leading_whitespace() {
        assert_eq!(classify("  Hello  "), LineKind::Text("  Hello"));
    }
}
