pub mod config;

pub use config::{DEFAULT_RESOURCES, InventoryConfig, ServerConfig, ServiceConfig};
