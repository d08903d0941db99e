//! Content module - discovery, markdown conversion and post metadata

pub mod loader;
mod markdown;
mod post;

pub use markdown::{ConvertError, MarkdownRenderer};
pub use post::{parse_post, ContentFile, PostSummary, POSTS_OUTPUT_DIR};
