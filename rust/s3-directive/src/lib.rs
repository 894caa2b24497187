//! # s3-directive
//!
//! A parser for the wiki markup that embeds S3 objects in a page.
//!
//! ## Syntax
//!
//! **Download link** (label is the file name):
//! ```text
//! {{s3://my-bucket/path/to/file.pdf}}
//! ```
//!
//! **Title** after `|`:
//! ```text
//! {{s3://my-bucket/path/to/file.pdf|My Document}}
//! ```
//!
//! **Parameters** after `?`, separated by `&`:
//! ```text
//! {{s3://my-bucket/images/photo.jpg?200x150&nolink|Team Photo}}
//! ```
//! `W` or `WxH` sets the image size, `nolink`, `direct` and `linkonly`
//! choose how an image is linked, and `cache`, `recache` or `nocache` are
//! page cache hints. Anything else is ignored.
//!
//! **Alignment** follows the usual wiki convention of padding inside the
//! braces:
//! ```text
//! {{s3://my-bucket/images/photo.jpg }}     left
//! {{ s3://my-bucket/images/photo.jpg}}     right
//! {{ s3://my-bucket/images/photo.jpg }}    center
//! ```
//!
//! ## Example
//!
//! ```
//! use s3_directive::{parse, scan};
//!
//! let page = "Intro {{ s3://docs/guide.pdf|Guide }} outro";
//! let candidate = scan(page).next().unwrap();
//! let directive = parse(candidate.text).unwrap();
//!
//! assert_eq!(directive.bucket, "docs");
//! assert_eq!(directive.label(), "Guide");
//! // Only the space before `|` counts once there is a title.
//! assert_eq!(directive.alignment, s3_directive::Alignment::Right);
//! assert_eq!(directive.to_string(), "{{ s3://docs/guide.pdf|Guide}}");
//! ```

pub mod ast;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod tokenizer;

pub use ast::{Alignment, CacheHint, Directive, Param, RenderParams};
pub use error::ParseError;
pub use parser::parse;
pub use scanner::{Candidate, Scanner, scan};
