//! Configuration module

mod site;

pub use site::IndexConfig;
pub use site::IndexOrder;
pub use site::MarkdownConfig;
pub use site::ServerConfig;
pub use site::SiteConfig;
