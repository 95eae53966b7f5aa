//! Type conversions between inventory config and placement types.
//!
//! Bridges `fitgrid_core::{InventoryConfig, ServiceConfig, ServerConfig}`
//! to the placement engine's `Service` and `ServerPool`.

use fitgrid_core::{InventoryConfig, ServerConfig, ServiceConfig};

use crate::error::PlacementError;
use crate::types::{Server, ServerPool, Service};

/// Convert a [`ServiceConfig`] to a [`Service`].
///
/// Demands are not validated here; [`place`](crate::place) rejects bad
/// demands before scoring.
pub fn service_from_config(config: &ServiceConfig) -> Service {
    Service::new(config.id.clone(), config.demand.clone())
}

/// Convert a [`ServerConfig`] to a [`Server`] at full capacity.
pub fn server_from_config(config: &ServerConfig) -> Server {
    Server::new(config.id.clone(), config.capacity.clone())
}

/// Build the server pool described by an inventory, preserving file order.
pub fn pool_from_inventory(inventory: &InventoryConfig) -> Result<ServerPool, PlacementError> {
    let mut pool = ServerPool::new(inventory.resources.iter().cloned())?;
    for server in &inventory.servers {
        pool.insert(server_from_config(server))?;
    }
    Ok(pool)
}

/// Convert an inventory into placement inputs: services in file order and
/// the server pool.
pub fn inventory_to_inputs(
    inventory: &InventoryConfig,
) -> Result<(Vec<Service>, ServerPool), PlacementError> {
    let pool = pool_from_inventory(inventory)?;
    let services = inventory.services.iter().map(service_from_config).collect();
    Ok((services, pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(id: &str, capacity: Vec<f64>) -> ServerConfig {
        ServerConfig {
            id: id.to_string(),
            capacity,
        }
    }

    #[test]
    fn converts_demo_inventory() {
        let (services, pool) = inventory_to_inputs(&InventoryConfig::demo()).unwrap();

        assert_eq!(services.len(), 3);
        assert_eq!(services[0].id, "web-server");
        assert_eq!(services[2].demand.components(), &[3.0, 4.0]);

        assert_eq!(pool.resources(), &["cpu".to_string(), "ram".to_string()]);
        let ids: Vec<&str> = pool.iter().map(Server::id).collect();
        assert_eq!(ids, vec!["server-1-small", "server-2-medium", "server-3-large"]);
    }

    #[test]
    fn server_starts_at_full_capacity() {
        let s = server_from_config(&server("s1", vec![6.0, 8.0]));
        assert_eq!(s.available(), s.capacity());
    }

    #[test]
    fn duplicate_server_is_rejected() {
        let inventory = InventoryConfig {
            resources: vec!["cpu".to_string(), "ram".to_string()],
            services: Vec::new(),
            servers: vec![server("s1", vec![1.0, 1.0]), server("s1", vec![2.0, 2.0])],
        };

        let err = pool_from_inventory(&inventory).unwrap_err();
        assert_eq!(err, PlacementError::DuplicateServer("s1".to_string()));
    }

    #[test]
    fn capacity_must_match_resources() {
        let inventory = InventoryConfig {
            resources: vec!["cpu".to_string(), "ram".to_string(), "gpu".to_string()],
            services: Vec::new(),
            servers: vec![server("s1", vec![1.0, 1.0])],
        };

        let err = pool_from_inventory(&inventory).unwrap_err();
        assert!(matches!(
            err,
            PlacementError::DimensionMismatch { expected: 3, found: 2, .. }
        ));
    }

    #[test]
    fn empty_resource_list_is_rejected() {
        let inventory = InventoryConfig {
            resources: Vec::new(),
            services: Vec::new(),
            servers: Vec::new(),
        };
        assert_eq!(pool_from_inventory(&inventory).unwrap_err(), PlacementError::NoDimensions);
    }
}
