//! Parser for embed directives.
//!
//! Converts a token stream (from [`crate::tokenizer`]) into a [`Directive`].
//!
//! ```text
//! directive = '{{' ws? scheme location ('?' params)? ws? ('|' title)? '}}'
//! scheme    = "s3:" '/' '/'
//! location  = bucket '/' key
//! bucket    = (any token except '/' '?' '|' '}}')+
//! key       = (any token except '?' '|' '}}')+
//! params    = param ('&' param)*
//! param     = (any token except '&' '|' '}}')*
//! title     = (any token except '}}')*
//! ```
//!
//! The first `|` ends the path and parameters, the first `?` before it ends
//! the path, and the first `/` after the scheme ends the bucket. Bucket, key,
//! parameters and title are trimmed.
//!
//! Alignment comes from a space directly after `{{` and directly before the
//! `|` (when there is a title) or the `}}` (when there is none). Other
//! whitespace there is trimmed but does not pad.

use crate::ast::*;
use crate::error::ParseError;
use crate::tokenizer::{Token, source, tokenize};

const SCHEME: &str = "s3:";

/// A token-stream parser.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn found(&self) -> String {
        self.peek()
            .map(|t| format!("{t:?}"))
            .unwrap_or("end of input".into())
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        if self.peek() == Some(expected) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::Expected {
                expected: format!("{expected:?}"),
                found: self.found(),
            })
        }
    }

    /// Whether the token just consumed was whitespace ending in a space.
    fn after_space(&self) -> bool {
        matches!(
            self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)),
            Some(Token::Whitespace(s)) if s.ends_with(' ')
        )
    }

    /// Consume tokens up to (not including) the first one matching `stop`,
    /// returning their source text.
    fn take_until(&mut self, stop: impl Fn(&Token) -> bool) -> String {
        let start = self.pos;
        while let Some(token) = self.peek() {
            if stop(token) {
                break;
            }
            self.pos += 1;
        }
        source(&self.tokens[start..self.pos])
    }

    // --- Scheme ---

    fn parse_scheme(&mut self) -> Result<(), ParseError> {
        let scheme = matches!(self.peek(), Some(Token::Text(t)) if t == SCHEME)
            && self.tokens.get(self.pos + 1) == Some(&Token::Slash)
            && self.tokens.get(self.pos + 2) == Some(&Token::Slash);
        if !scheme {
            return Err(ParseError::MissingScheme);
        }
        self.pos += 3;
        Ok(())
    }

    // --- Location ---

    fn parse_bucket(&mut self) -> Result<String, ParseError> {
        let bucket = self.take_until(|t| {
            matches!(t, Token::Slash | Token::Question | Token::Pipe | Token::Close)
        });
        if self.peek() != Some(&Token::Slash) {
            return Err(ParseError::MissingObjectKey);
        }
        self.advance(); // consume `/`

        let bucket = bucket.trim();
        if bucket.is_empty() {
            return Err(ParseError::EmptyBucket);
        }
        Ok(bucket.to_string())
    }

    fn parse_key(&mut self) -> Result<String, ParseError> {
        let key = self.take_until(|t| matches!(t, Token::Question | Token::Pipe | Token::Close));
        let key = key.trim();
        if key.is_empty() {
            return Err(ParseError::EmptyObjectKey);
        }
        Ok(key.to_string())
    }

    // --- Parameters ---

    fn parse_params(&mut self) -> RenderParams {
        let mut params = RenderParams::default();
        if self.peek() != Some(&Token::Question) {
            return params;
        }
        self.advance(); // consume `?`

        loop {
            let part = self.take_until(|t| matches!(t, Token::Ampersand | Token::Pipe | Token::Close));
            params.apply(Param::classify(part.trim()));

            if self.peek() == Some(&Token::Ampersand) {
                self.advance();
            } else {
                break;
            }
        }
        params
    }

    // --- Title ---

    fn parse_title(&mut self) -> Option<String> {
        if self.peek() != Some(&Token::Pipe) {
            return None;
        }
        self.advance(); // consume `|`

        let title = self.take_until(|t| matches!(t, Token::Close));
        let title = title.trim();
        (!title.is_empty()).then(|| title.to_string())
    }

    // --- Directive ---

    fn parse_directive(&mut self) -> Result<Directive, ParseError> {
        self.expect(&Token::Open)?;
        let padded_left = match self.peek() {
            Some(Token::Whitespace(s)) => {
                let padded = s.starts_with(' ');
                self.advance();
                padded
            }
            _ => false,
        };

        self.parse_scheme()?;
        let bucket = self.parse_bucket()?;
        let key = self.parse_key()?;
        let params = self.parse_params();

        // Whatever precedes `|`, or `}}` when there is no title.
        let padded_right = self.after_space();
        let title = self.parse_title();

        self.expect(&Token::Close)?;
        if self.peek().is_some() {
            return Err(ParseError::Expected {
                expected: "end of directive".into(),
                found: self.found(),
            });
        }

        Ok(Directive {
            bucket,
            key,
            title,
            alignment: Alignment::from_padding(padded_left, padded_right),
            params,
        })
    }
}

/// Parse the full text of one directive, delimiters included.
///
/// # Example
///
/// ```
/// use s3_directive::{parse, Alignment};
///
/// let directive = parse("{{ s3://photos/team.jpg?200&nolink|Team }}").unwrap();
/// assert_eq!(directive.bucket, "photos");
/// assert_eq!(directive.key, "team.jpg");
/// assert_eq!(directive.title.as_deref(), Some("Team"));
/// assert_eq!(directive.alignment, Alignment::Right);
/// assert_eq!(directive.params.width, Some(200));
/// assert!(directive.params.no_link);
/// ```
pub fn parse(input: &str) -> Result<Directive, ParseError> {
    let mut parser = Parser::new(tokenize(input));
    parser.parse_directive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_parses_a_full_directive() {
        let directive = parse("{{s3://my-bucket/images/photo.jpg?200x150&nolink|Team Photo}}").unwrap();

        assert_eq!(
            directive,
            Directive {
                bucket: "my-bucket".into(),
                key: "images/photo.jpg".into(),
                title: Some("Team Photo".into()),
                alignment: Alignment::None,
                params: RenderParams {
                    width: Some(200),
                    height: Some(150),
                    no_link: true,
                    ..Default::default()
                },
            }
        );
    }

    #[test]
    fn it_derives_alignment_without_a_title() {
        assert_eq!(parse("{{ s3://b/o.png }}").unwrap().alignment, Alignment::Center);
        assert_eq!(parse("{{s3://b/o.png }}").unwrap().alignment, Alignment::Left);
        assert_eq!(parse("{{ s3://b/o.png}}").unwrap().alignment, Alignment::Right);
        assert_eq!(parse("{{s3://b/o.png}}").unwrap().alignment, Alignment::None);
    }

    #[test]
    fn it_reads_right_padding_before_the_title_separator() {
        assert_eq!(parse("{{ s3://b/o.png |T}}").unwrap().alignment, Alignment::Center);
        assert_eq!(parse("{{s3://b/o.png |T}}").unwrap().alignment, Alignment::Left);
        assert_eq!(parse("{{ s3://b/o.png|T}}").unwrap().alignment, Alignment::Right);
        // Padding before `}}` does not count once a title is present.
        assert_eq!(parse("{{s3://b/o.png|T }}").unwrap().alignment, Alignment::None);
        assert_eq!(parse("{{ s3://b/o.png|T }}").unwrap().alignment, Alignment::Right);
        assert_eq!(
            parse("{{ s3://photos/team.jpg?200&nolink|Team }}").unwrap().alignment,
            Alignment::Right
        );
    }

    #[test]
    fn it_reads_right_padding_after_parameters() {
        let directive = parse("{{s3://b/o.png?200 |T}}").unwrap();
        assert_eq!(directive.alignment, Alignment::Left);
        assert_eq!(directive.params.width, Some(200));
    }

    #[test]
    fn it_only_counts_spaces_as_padding() {
        for input in [
            "{{s3://b/o.png\n}}",
            "{{s3://b/o.png\t}}",
            "{{s3://b/o.png\u{a0}}}",
            "{{\ts3://b/o.png}}",
            "{{s3://b/o.png\t|T}}",
        ] {
            assert_eq!(parse(input).unwrap().alignment, Alignment::None, "{input:?}");
        }
        assert_eq!(parse("{{s3://b/o.png\t }}").unwrap().alignment, Alignment::Left);
        assert_eq!(parse("{{ \ts3://b/o.png}}").unwrap().alignment, Alignment::Right);
    }

    #[test]
    fn it_only_counts_spaces_as_padding_in_scanned_pages() {
        let page = "{{s3://b/o.png\n}}";
        let candidate = crate::scan(page).next().unwrap();
        assert_eq!(parse(candidate.text).unwrap().alignment, Alignment::None);
    }

    #[test]
    fn it_parses_parameters() {
        let directive = parse("{{s3://b/o.png?200x150&nolink}}").unwrap();
        assert_eq!(directive.params.width, Some(200));
        assert_eq!(directive.params.height, Some(150));
        assert!(directive.params.no_link);

        let directive = parse("{{s3://b/o.png?nolink&direct}}").unwrap();
        assert!(directive.params.no_link);
        assert!(directive.params.direct);

        let directive = parse("{{s3://b/o.png?abc}}").unwrap();
        assert_eq!(directive.params, RenderParams::default());
    }

    #[test]
    fn it_trims_parameters() {
        let directive = parse("{{s3://b/o.png? 300 & linkonly & recache }}").unwrap();
        assert_eq!(directive.params.width, Some(300));
        assert!(directive.params.link_only);
        assert_eq!(directive.params.cache, Some(CacheHint::Recache));
    }

    #[test]
    fn it_ignores_empty_parameters() {
        let directive = parse("{{s3://b/o.png?&&}}").unwrap();
        assert_eq!(directive.params, RenderParams::default());
        assert_eq!(directive.key, "o.png");
    }

    #[test]
    fn it_keeps_nested_paths_in_the_key() {
        let directive = parse("{{s3://bucket/path/to/file.jpg}}").unwrap();
        assert_eq!(directive.bucket, "bucket");
        assert_eq!(directive.key, "path/to/file.jpg");
        assert_eq!(directive.title, None);
    }

    #[test]
    fn it_does_not_decode_the_key() {
        let directive = parse("{{s3://b/My%20File.pdf}}").unwrap();
        assert_eq!(directive.key, "My%20File.pdf");
    }

    #[test]
    fn it_keeps_separators_inside_the_title() {
        let directive = parse("{{s3://b/a.pdf|What? A/B & C | D}}").unwrap();
        assert_eq!(directive.title.as_deref(), Some("What? A/B & C | D"));
        assert_eq!(directive.params, RenderParams::default());
    }

    #[test]
    fn it_treats_an_empty_title_as_absent() {
        assert_eq!(parse("{{s3://b/a.pdf|}}").unwrap().title, None);
        assert_eq!(parse("{{s3://b/a.pdf|   }}").unwrap().title, None);
    }

    #[test]
    fn it_trims_bucket_and_key() {
        let directive = parse("{{s3:// b / a b.pdf }}").unwrap();
        assert_eq!(directive.bucket, "b");
        assert_eq!(directive.key, "a b.pdf");
    }

    #[test]
    fn it_fails_without_a_bucket_separator() {
        assert_eq!(parse("{{s3://justabucket}}"), Err(ParseError::MissingObjectKey));
        assert_eq!(parse("{{s3://justabucket?200|T}}"), Err(ParseError::MissingObjectKey));
    }

    #[test]
    fn it_fails_without_the_scheme() {
        assert_eq!(parse("{{http://b/o.png}}"), Err(ParseError::MissingScheme));
        assert_eq!(parse("{{s3:b/o.png}}"), Err(ParseError::MissingScheme));
        assert_eq!(parse("{{S3://b/o.png}}"), Err(ParseError::MissingScheme));
    }

    #[test]
    fn it_fails_on_empty_bucket_or_key() {
        assert_eq!(parse("{{s3:///o.png}}"), Err(ParseError::EmptyBucket));
        assert_eq!(parse("{{s3://b/}}"), Err(ParseError::EmptyObjectKey));
        assert_eq!(parse("{{s3://b/ ?200}}"), Err(ParseError::EmptyObjectKey));
    }

    #[test]
    fn it_fails_without_delimiters() {
        assert!(matches!(parse("s3://b/o.png"), Err(ParseError::Expected { .. })));
        assert!(matches!(parse("{{s3://b/o.png"), Err(ParseError::Expected { .. })));
        assert!(matches!(parse("{{s3://b/o.png}} trailing"), Err(ParseError::Expected { .. })));
    }

    #[test]
    fn it_roundtrips_through_display() {
        for input in [
            "{{s3://b/o.png}}",
            "{{ s3://b/dir/o.png?200x150&nolink }}",
            "{{s3://b/o.png?300&direct&nocache |Caption}}",
            "{{ s3://b/report.pdf?linkonly|Q1 Report}}",
        ] {
            let directive = parse(input).unwrap();
            assert_eq!(directive.to_string(), input);
            assert_eq!(parse(&directive.to_string()).unwrap(), directive);
        }
    }
}
