//! HTML elements produced for a directive.

use std::fmt;

use s3_directive::Alignment;

/// CSS class of download links.
pub const DOWNLOAD_CLASS: &str = "s3-download";
/// CSS class of inline errors.
pub const ERROR_CLASS: &str = "s3-error";
/// CSS class of images and their containers.
pub const MEDIA_CLASS: &str = "media";

/// Escape text for use in HTML content and attribute values.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Container class for an aligned image: `media` plus an alignment suffix.
pub fn media_class(alignment: Alignment) -> String {
    match alignment {
        Alignment::None => MEDIA_CLASS.to_string(),
        other => format!("{MEDIA_CLASS} {MEDIA_CLASS}{other}"),
    }
}

/// Element wrapping an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// `<div>`; used for centered images.
    Block,
    /// `<span>` around an unlinked image. A linked image needs no extra
    /// container, the link itself is the inline element.
    Inline,
}

/// An embedded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub url: String,
    pub alt: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Class of the container and link.
    pub class: String,
    /// Whether the image is wrapped in a link to its own URL.
    pub linked: bool,
    pub container: Container,
}

impl Image {
    fn write_img(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<img src=\"{}\" alt=\"{}\" class=\"{MEDIA_CLASS}\"",
            html_escape(&self.url),
            html_escape(&self.alt)
        )?;
        if let Some(width) = self.width.filter(|w| *w > 0) {
            write!(f, " width=\"{width}\"")?;
        }
        if let Some(height) = self.height.filter(|h| *h > 0) {
            write!(f, " height=\"{height}\"")?;
        }
        write!(f, " loading=\"lazy\" />")
    }

    fn write_inner(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.linked {
            write!(
                f,
                "<a href=\"{}\" class=\"{}\" target=\"_blank\">",
                html_escape(&self.url),
                html_escape(&self.class)
            )?;
            self.write_img(f)?;
            write!(f, "</a>")
        } else {
            self.write_img(f)
        }
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let class = html_escape(&self.class);
        match (self.container, self.linked) {
            (Container::Block, _) => {
                write!(f, "<div class=\"{class}\">")?;
                self.write_inner(f)?;
                write!(f, "</div>")
            }
            (Container::Inline, false) => {
                write!(f, "<span class=\"{class}\">")?;
                self.write_inner(f)?;
                write!(f, "</span>")
            }
            (Container::Inline, true) => self.write_inner(f),
        }
    }
}

/// What a directive renders to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// A download link.
    Link {
        url: String,
        label: String,
        class: String,
    },
    /// An embedded image.
    Image(Image),
    /// A visible inline error.
    Error { message: String },
}

impl Element {
    pub fn link(url: impl Into<String>, label: impl Into<String>) -> Self {
        Element::Link {
            url: url.into(),
            label: label.into(),
            class: DOWNLOAD_CLASS.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Element::Error {
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Element::Error { .. })
    }

    /// The URL the element points at, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Element::Link { url, .. } => Some(url.as_str()),
            Element::Image(image) => Some(image.url.as_str()),
            Element::Error { .. } => None,
        }
    }
}

/// Renders the element as escaped HTML.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Link { url, label, class } => write!(
                f,
                "<a href=\"{}\" class=\"{}\" target=\"_blank\">{}</a>",
                html_escape(url),
                html_escape(class),
                html_escape(label)
            ),
            Element::Image(image) => write!(f, "{image}"),
            Element::Error { message } => write!(
                f,
                "<span class=\"{ERROR_CLASS}\">Error: {}</span>",
                html_escape(message)
            ),
        }
    }
}
