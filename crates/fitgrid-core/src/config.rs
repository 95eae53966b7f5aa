//! Inventory file (`inventory.toml`) parser.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Resource dimensions used when an inventory doesn't name its own.
pub const DEFAULT_RESOURCES: [&str; 2] = ["cpu", "ram"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryConfig {
    /// Names of the resource dimensions, in vector order.
    #[serde(default = "default_resources")]
    pub resources: Vec<String>,
    /// Services to place, in processing order.
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
    /// Server pool, in scoring order.
    #[serde(default)]
    pub servers: Vec<ServerConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    pub id: String,
    pub demand: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub id: String,
    pub capacity: Vec<f64>,
}

fn default_resources() -> Vec<String> {
    DEFAULT_RESOURCES.iter().map(|r| r.to_string()).collect()
}

impl InventoryConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: InventoryConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The three-tier CPU/RAM scenario: a web server, a backend API and
    /// a database placed onto a small, a medium and a large server.
    pub fn demo() -> Self {
        let service = |id: &str, cpu: f64, ram: f64| ServiceConfig {
            id: id.to_string(),
            demand: vec![cpu, ram],
        };
        let server = |id: &str, cpu: f64, ram: f64| ServerConfig {
            id: id.to_string(),
            capacity: vec![cpu, ram],
        };

        InventoryConfig {
            resources: default_resources(),
            services: vec![
                service("web-server", 2.0, 2.0),
                service("backend-api", 3.0, 3.0),
                service("database", 3.0, 4.0),
            ],
            servers: vec![
                server("server-1-small", 4.0, 4.0),
                server("server-2-medium", 6.0, 8.0),
                server("server-3-large", 8.0, 16.0),
            ],
        }
    }
}
