//! Tokenizer for embed directives.
//!
//! Splits the raw directive text into delimiters, separators, whitespace runs
//! and text runs. Every token displays as exactly the text it was read from,
//! so any slice of the token stream can be turned back into source text.
//!
//! Token types:
//! - **Open** / **Close**: `{{` and `}}`
//! - **Slash**, **Question**, **Ampersand**, **Pipe**: `/`, `?`, `&`, `|`
//! - **Whitespace**: a run of whitespace characters
//! - **Text**: a run of anything else

use std::fmt;

/// A classified token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `{{`
    Open,
    /// `}}`
    Close,
    /// `/`
    Slash,
    /// `?` (starts the parameter list)
    Question,
    /// `&` (separates parameters)
    Ampersand,
    /// `|` (starts the title)
    Pipe,
    /// One or more whitespace characters.
    Whitespace(String),
    /// Any other run of characters.
    Text(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Open => write!(f, "{{{{"),
            Token::Close => write!(f, "}}}}"),
            Token::Slash => write!(f, "/"),
            Token::Question => write!(f, "?"),
            Token::Ampersand => write!(f, "&"),
            Token::Pipe => write!(f, "|"),
            Token::Whitespace(s) | Token::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Concatenate the source text of a run of tokens.
pub fn source(tokens: &[Token]) -> String {
    tokens.iter().map(Token::to_string).collect()
}

fn separator(ch: char) -> Option<Token> {
    match ch {
        '/' => Some(Token::Slash),
        '?' => Some(Token::Question),
        '&' => Some(Token::Ampersand),
        '|' => Some(Token::Pipe),
        _ => None,
    }
}

/// Tokenize directive text.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut space = String::new();

    let flush = |text: &mut String, space: &mut String, tokens: &mut Vec<Token>| {
        if !text.is_empty() {
            tokens.push(Token::Text(std::mem::take(text)));
        }
        if !space.is_empty() {
            tokens.push(Token::Whitespace(std::mem::take(space)));
        }
    };

    let mut rest = input;
    while let Some(ch) = rest.chars().next() {
        if rest.starts_with("{{") || rest.starts_with("}}") {
            flush(&mut text, &mut space, &mut tokens);
            tokens.push(if ch == '{' { Token::Open } else { Token::Close });
            rest = &rest[2..];
            continue;
        }

        if let Some(token) = separator(ch) {
            flush(&mut text, &mut space, &mut tokens);
            tokens.push(token);
        } else if ch.is_whitespace() {
            if !text.is_empty() {
                tokens.push(Token::Text(std::mem::take(&mut text)));
            }
            space.push(ch);
        } else {
            if !space.is_empty() {
                tokens.push(Token::Whitespace(std::mem::take(&mut space)));
            }
            text.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }

    flush(&mut text, &mut space, &mut tokens);
    tokens
}
