//! Configuration module

mod site;
mod storage;

pub use site::ServerConfig;
pub use site::SiteConfig;
pub use storage::StorageConfig;
