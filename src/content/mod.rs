//! Content parsing and rendering

pub mod frontmatter;
pub mod loader;
pub mod markdown;
pub mod post;

pub use frontmatter::Frontmatter;
pub use loader::ContentLoader;
pub use markdown::{MarkdownRenderer, RenderedDocument};
pub use post::Post;
