//! Parsed representation of an embed directive.
//!
//! A directive like `{{ s3://photos/2024/team.jpg?200x150&nolink|Team }}`
//! is represented as a [`Directive`] with bucket `photos`, key
//! `2024/team.jpg`, title `Team`, [`Alignment::Right`] and
//! [`RenderParams`] holding the size and the `nolink` flag. With a title,
//! only a space before `|` counts as right padding.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Layout hint derived from the spaces just inside the directive braces.
///
/// A space toward a side pushes the embedded object away from that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    None,
    Left,
    Right,
    Center,
}

impl Alignment {
    /// Derive alignment from the presence of inner padding.
    pub fn from_padding(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, true) => Alignment::Center,
            (true, false) => Alignment::Right,
            (false, true) => Alignment::Left,
            (false, false) => Alignment::None,
        }
    }

    /// Whether the directive was written with a space after `{{`.
    pub fn padded_left(&self) -> bool {
        matches!(self, Alignment::Center | Alignment::Right)
    }

    /// Whether the directive was written with a space before `|` or `}}`.
    pub fn padded_right(&self) -> bool {
        matches!(self, Alignment::Center | Alignment::Left)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::None => "none",
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Center => "center",
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page cache hint carried by a directive. Parsed but not acted upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheHint {
    Cache,
    Recache,
    NoCache,
}

impl CacheHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheHint::Cache => "cache",
            CacheHint::Recache => "recache",
            CacheHint::NoCache => "nocache",
        }
    }
}

impl FromStr for CacheHint {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cache" => Ok(CacheHint::Cache),
            "recache" => Ok(CacheHint::Recache),
            "nocache" => Ok(CacheHint::NoCache),
            _ => Err(()),
        }
    }
}

impl fmt::Display for CacheHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `&`-separated item of the parameter string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    NoLink,
    Direct,
    LinkOnly,
    /// `W` or `WxH`.
    Size { width: u32, height: Option<u32> },
    Cache(CacheHint),
    /// Anything else. Ignored so that newer syntax degrades gracefully.
    Unknown(String),
}

impl Param {
    /// Classify a trimmed parameter.
    ///
    /// Rules are tried in order: `nolink`, `direct`, `linkonly`, a size,
    /// then a cache hint.
    pub fn classify(part: &str) -> Self {
        match part {
            "nolink" => Param::NoLink,
            "direct" => Param::Direct,
            "linkonly" => Param::LinkOnly,
            _ => {
                if let Some((width, height)) = parse_size(part) {
                    Param::Size { width, height }
                } else if let Ok(hint) = part.parse() {
                    Param::Cache(hint)
                } else {
                    Param::Unknown(part.to_string())
                }
            }
        }
    }
}

/// Parse `digits` or `digits x digits` (either case of `x`).
fn parse_size(part: &str) -> Option<(u32, Option<u32>)> {
    fn number(s: &str) -> Option<u32> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse().ok()
    }

    match part.find(['x', 'X']) {
        Some(pos) => Some((number(&part[..pos])?, Some(number(&part[pos + 1..])?))),
        None => Some((number(part)?, None)),
    }
}

/// Optional modifiers that control how an embedded object is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RenderParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub no_link: bool,
    pub direct: bool,
    pub link_only: bool,
    pub cache: Option<CacheHint>,
}

impl RenderParams {
    /// Fold a parameter into these settings. Unknown parameters are dropped.
    pub fn apply(&mut self, param: Param) {
        match param {
            Param::NoLink => self.no_link = true,
            Param::Direct => self.direct = true,
            Param::LinkOnly => self.link_only = true,
            Param::Size { width, height } => {
                self.width = Some(width);
                if height.is_some() {
                    self.height = height;
                }
            }
            Param::Cache(hint) => self.cache = Some(hint),
            Param::Unknown(_) => {}
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &RenderParams::default()
    }
}

impl fmt::Display for RenderParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(width) = self.width {
            match self.height {
                Some(height) => parts.push(format!("{width}x{height}")),
                None => parts.push(width.to_string()),
            }
        }
        if self.no_link {
            parts.push("nolink".into());
        }
        if self.direct {
            parts.push("direct".into());
        }
        if self.link_only {
            parts.push("linkonly".into());
        }
        if let Some(cache) = self.cache {
            parts.push(cache.to_string());
        }
        write!(f, "{}", parts.join("&"))
    }
}

/// One parsed `{{s3://...}}` occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    /// Bucket name; never empty and never contains `/`.
    pub bucket: String,
    /// Object key as written; may contain `/`, not URL-decoded.
    pub key: String,
    /// Display text after `|`, if any.
    pub title: Option<String>,
    pub alignment: Alignment,
    pub params: RenderParams,
}

impl Directive {
    /// The final path segment of the object key, ignoring trailing slashes.
    pub fn filename(&self) -> &str {
        let key = self.key.trim_end_matches('/');
        key.rsplit('/').next().unwrap_or(key)
    }

    /// The title if one was given, else the filename.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or_else(|| self.filename())
    }

    /// Lowercased extension of the filename, if it has one.
    pub fn extension(&self) -> Option<String> {
        let filename = self.filename();
        match filename.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => Some(ext.to_ascii_lowercase()),
            _ => None,
        }
    }
}

/// Renders the directive back to canonical markup.
impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{{")?;
        if self.alignment.padded_left() {
            write!(f, " ")?;
        }
        write!(f, "s3://{}/{}", self.bucket, self.key)?;
        if !self.params.is_empty() {
            write!(f, "?{}", self.params)?;
        }
        if self.alignment.padded_right() {
            write!(f, " ")?;
        }
        if let Some(title) = &self.title {
            write!(f, "|{title}")?;
        }
        write!(f, "}}}}")
    }
}
