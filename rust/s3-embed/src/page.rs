//! Rendering every directive on a page.

use chrono::{DateTime, Utc};
use s3_directive::{parse, scan};

use crate::Config;
use crate::render::render;

/// A page with its directives replaced by HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub html: String,
    /// `false` if any directive on the page was signed.
    pub cacheable: bool,
    /// Number of directives replaced.
    pub rendered: usize,
}

/// Replace each directive in `text` with its rendered element.
///
/// Candidates that fail to parse, and all surrounding text, are copied
/// through untouched.
pub fn render_page(text: &str, config: &Config, now: DateTime<Utc>) -> RenderedPage {
    let mut html = String::with_capacity(text.len());
    let mut cacheable = true;
    let mut rendered = 0;
    let mut copied = 0;

    for candidate in scan(text) {
        let directive = match parse(candidate.text) {
            Ok(directive) => directive,
            Err(error) => {
                tracing::debug!(text = candidate.text, %error, "not an s3 directive");
                continue;
            }
        };

        let output = render(&directive, config, now);
        html.push_str(&text[copied..candidate.start]);
        html.push_str(&output.to_string());
        copied = candidate.end;
        cacheable &= output.cacheable;
        rendered += 1;
    }
    html.push_str(&text[copied..]);

    RenderedPage {
        html,
        cacheable,
        rendered,
    }
}
