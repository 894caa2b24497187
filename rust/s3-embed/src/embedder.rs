//! Host-facing entry point bundling a configuration.

use chrono::{DateTime, Utc};
use s3_directive::{Directive, parse};

use crate::page::{RenderedPage, render_page};
use crate::render::{Rendered, render};
use crate::Config;

/// Entry point for a host rendering pipeline.
///
/// The host hands each matched directive to [`Embedder::handle`], then
/// renders what it got back. Pages holding a rendered directive must not be
/// cached past the lifetime of its URLs; see [`Rendered::cacheable`].
#[derive(Debug, Clone, Default)]
pub struct Embedder {
    config: Config,
}

impl Embedder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Parse a matched directive. Text that is not a directive yields `None`.
    pub fn handle(&self, raw: &str) -> Option<Directive> {
        match parse(raw) {
            Ok(directive) => Some(directive),
            Err(error) => {
                tracing::debug!(text = raw, %error, "not an s3 directive");
                None
            }
        }
    }

    /// Render with the current time.
    pub fn render(&self, directive: &Directive) -> Rendered {
        self.render_at(directive, Utc::now())
    }

    pub fn render_at(&self, directive: &Directive, now: DateTime<Utc>) -> Rendered {
        render(directive, &self.config, now)
    }

    pub fn render_page(&self, text: &str) -> RenderedPage {
        self.render_page_at(text, Utc::now())
    }

    pub fn render_page_at(&self, text: &str, now: DateTime<Utc>) -> RenderedPage {
        render_page(text, &self.config, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use s3_directive::Alignment;

    fn embedder() -> Embedder {
        Embedder::new(Config::new("eu-west-1", "AKIATEST", "secret").with_expires(900))
    }

    #[test]
    fn it_hands_back_parsed_directives() {
        let directive = embedder().handle("{{ s3://docs/guide.pdf }}").unwrap();
        assert_eq!(directive.bucket, "docs");
        assert_eq!(directive.key, "guide.pdf");
        assert_eq!(directive.alignment, Alignment::Center);
    }

    #[test]
    fn it_declines_malformed_directives() {
        let embedder = embedder();
        assert_eq!(embedder.handle("{{s3://docs}}"), None);
        assert_eq!(embedder.handle("{{s3://docs/}}"), None);
        assert_eq!(embedder.handle("{{http://docs/a.pdf}}"), None);
    }

    #[test]
    fn it_renders_with_an_injected_clock() {
        let embedder = embedder();
        let directive = embedder.handle("{{s3://docs/guide.pdf}}").unwrap();
        let now = Utc.with_ymd_and_hms(2025, 5, 7, 5, 48, 59).unwrap();

        let first = embedder.render_at(&directive, now);
        let second = embedder.render_at(&directive, now);

        assert_eq!(first, second);
        assert!(!first.cacheable);
        let url = first.element.url().unwrap();
        assert!(url.contains("X-Amz-Date=20250507T054859Z"));
        assert!(url.contains("X-Amz-Expires=900"));
        assert!(url.contains("%2F20250507%2Feu-west-1%2Fs3%2Faws4_request"));
    }

    #[test]
    fn it_renders_with_the_system_clock() {
        let embedder = embedder();
        let directive = embedder.handle("{{s3://docs/guide.pdf}}").unwrap();
        let rendered = embedder.render(&directive);

        assert!(
            rendered
                .element
                .url()
                .is_some_and(|url| url.starts_with("https://docs.s3.eu-west-1.amazonaws.com/guide.pdf?"))
        );
    }
}
