//! Locates candidate directives in page text.
//!
//! A candidate is `{{`, an optional single space, the literal `s3://`, one or
//! more characters other than `}`, and `}}`. Candidates are only located
//! here; whether one is a valid directive is up to [`crate::parse`].

use std::ops::Range;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const MARKER: &str = "s3://";

/// A candidate directive found in a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Byte offset of the opening `{{`.
    pub start: usize,
    /// Byte offset just past the closing `}}`.
    pub end: usize,
    /// The matched text, delimiters included.
    pub text: &'a str,
}

impl Candidate<'_> {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Iterator over non-overlapping candidates, left to right.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Length of a candidate starting at `start`, if there is one.
    fn match_at(&self, start: usize) -> Option<usize> {
        let mut rest = self.text[start..].strip_prefix(OPEN)?;
        rest = rest.strip_prefix(' ').unwrap_or(rest);
        let body = rest.strip_prefix(MARKER)?;

        let brace = body.find('}')?;
        if brace == 0 || !body[brace..].starts_with(CLOSE) {
            return None;
        }
        let consumed = self.text.len() - start - body.len();
        Some(consumed + brace + CLOSE.len())
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Candidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(offset) = self.text.get(self.pos..)?.find(OPEN) {
            let start = self.pos + offset;
            match self.match_at(start) {
                Some(len) => {
                    let end = start + len;
                    self.pos = end;
                    return Some(Candidate {
                        start,
                        end,
                        text: &self.text[start..end],
                    });
                }
                None => self.pos = start + 1,
            }
        }
        self.pos = self.text.len();
        None
    }
}

/// Scan page text for candidate directives.
///
/// ```
/// let page = "See {{s3://docs/manual.pdf|the manual}} and {{wiki:page}}.";
/// let found: Vec<_> = s3_directive::scan(page).map(|c| c.text).collect();
/// assert_eq!(found, vec!["{{s3://docs/manual.pdf|the manual}}"]);
/// ```
pub fn scan(text: &str) -> Scanner<'_> {
    Scanner::new(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(page: &str) -> Vec<&str> {
        scan(page).map(|c| c.text).collect()
    }

    #[test]
    fn it_finds_directives_with_offsets() {
        let page = "a {{s3://b/o.png}} b {{ s3://b/x.pdf|X }}";
        let found: Vec<_> = scan(page).collect();

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].range(), 2..18);
        assert_eq!(&page[found[0].range()], "{{s3://b/o.png}}");
        assert_eq!(found[1].text, "{{ s3://b/x.pdf|X }}");
    }

    #[test]
    fn it_skips_other_brace_markup() {
        assert_eq!(texts("{{wiki:logo.png}} {{http://x/y}}"), Vec::<&str>::new());
    }

    #[test]
    fn it_allows_only_one_leading_space() {
        assert_eq!(texts("{{  s3://b/o.png}}"), Vec::<&str>::new());
    }

    #[test]
    fn it_requires_a_body() {
        assert_eq!(texts("{{s3://}}"), Vec::<&str>::new());
    }

    #[test]
    fn it_stops_at_the_first_closing_brace() {
        assert_eq!(texts("{{s3://b/o}x}}"), Vec::<&str>::new());
        assert_eq!(texts("{{s3://b/o}}}"), vec!["{{s3://b/o}}"]);
    }

    #[test]
    fn it_recovers_after_a_stray_opening_brace() {
        assert_eq!(texts("{{{s3://b/o.png}}"), vec!["{{s3://b/o.png}}"]);
    }

    #[test]
    fn it_handles_multibyte_text() {
        let page = "ünïcödé {{s3://b/ö.png|Bild}} ✓";
        let found: Vec<_> = scan(page).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(&page[found[0].range()], "{{s3://b/ö.png|Bild}}");
    }

    #[test]
    fn it_ignores_unterminated_candidates() {
        assert_eq!(texts("{{s3://b/o.png"), Vec::<&str>::new());
    }
}
