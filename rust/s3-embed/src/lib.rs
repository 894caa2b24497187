//! Renders `{{s3://bucket/key}}` wiki directives as time-limited links and
//! images.
//!
//! Each directive is parsed with [`s3_directive`], its object is presigned
//! with [`s3_presign`], and the result is emitted as an [`Element`]:
//!
//! - `linkonly`, or a key that is not an image, gives a download link
//! - an image gives an `<img>`, linked to its own URL unless `nolink` is set
//! - a signing failure gives an inline error
//!
//! Signed URLs expire, so anything rendered from a directive is reported as
//! not cacheable.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use s3_embed::{Config, Embedder};
//!
//! let embedder = Embedder::new(Config::new("us-east-1", "AKIAEXAMPLE", "secret"));
//! let directive = embedder
//!     .handle("{{s3://my-bucket/images/photo.jpg?200x150&nolink|Team Photo}}")
//!     .unwrap();
//! let rendered = embedder.render_at(&directive, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
//!
//! assert!(!rendered.cacheable);
//! assert!(rendered.to_string().starts_with("<span class=\"media\"><img src=\"https://my-bucket.s3.us-east-1.amazonaws.com/images/photo.jpg?"));
//! ```

mod config;
mod embedder;
mod error;
pub mod html;
mod page;
pub mod render;

pub use config::{Config, DEFAULT_REGION};
pub use embedder::Embedder;
pub use error::RenderError;
pub use html::{Element, Image};
pub use page::{RenderedPage, render_page};
pub use render::{MediaKind, Rendered, render};
