//! Turning a parsed directive into an element.

use chrono::{DateTime, Utc};
use s3_directive::{Alignment, Directive};
use s3_presign::{PresignedUrl, sign};

use crate::html::{Container, Element, Image, media_class};
use crate::{Config, RenderError};

/// File extensions rendered as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "ico"];

/// How an object is presented, judged by its key's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    File,
}

impl MediaKind {
    pub fn of(directive: &Directive) -> Self {
        match directive.extension() {
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext.as_str()) => MediaKind::Image,
            _ => MediaKind::File,
        }
    }
}

/// A rendered directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub element: Element,
    /// `false` once a time-limited URL was requested; the host must not
    /// cache the page that contains this element.
    pub cacheable: bool,
}

impl std::fmt::Display for Rendered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.element)
    }
}

/// Choose the element for a directive whose URL has been signed.
///
/// `linkonly` wins over everything and yields a plain link. Otherwise images
/// are embedded and every other file becomes a download link. An image with
/// `nolink` is shown bare; with `direct`, or with neither flag, it links to
/// its own URL.
pub fn element(directive: &Directive, url: &PresignedUrl) -> Element {
    let params = &directive.params;
    if params.link_only || MediaKind::of(directive) == MediaKind::File {
        return Element::link(url.as_str(), directive.label());
    }

    let container = match directive.alignment {
        Alignment::Center => Container::Block,
        _ => Container::Inline,
    };

    Element::Image(Image {
        url: url.to_string(),
        alt: directive.label().to_string(),
        width: params.width.filter(|w| *w > 0),
        height: params.height.filter(|h| *h > 0),
        class: media_class(directive.alignment),
        linked: !params.no_link,
        container,
    })
}

/// Presign the directive's object.
pub fn presign(
    directive: &Directive,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<PresignedUrl, RenderError> {
    let request = config.signing_request(&directive.bucket, &directive.key, now);
    Ok(sign(&request)?)
}

/// Render a directive at the given time.
///
/// Signing failures become an inline error element; they never propagate.
pub fn render(directive: &Directive, config: &Config, now: DateTime<Utc>) -> Rendered {
    tracing::debug!(
        bucket = %directive.bucket,
        key = %directive.key,
        alignment = %directive.alignment,
        "rendering s3 directive"
    );

    let element = match presign(directive, config, now) {
        Ok(url) => element(directive, &url),
        Err(error) => {
            tracing::warn!(
                bucket = %directive.bucket,
                key = %directive.key,
                %error,
                "failed to presign s3 object"
            );
            Element::error(error.to_string())
        }
    };

    Rendered {
        element,
        cacheable: false,
    }
}
