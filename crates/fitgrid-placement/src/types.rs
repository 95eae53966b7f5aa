//! Domain types for placement: resource vectors, services, servers,
//! the ordered server pool, and the per-service placement result.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::PlacementError;

/// Unique identifier for a service.
pub type ServiceId = String;

/// Unique identifier for a server.
pub type ServerId = String;

pub use fitgrid_core::config::DEFAULT_RESOURCES;

// ── ResourceVector ─────────────────────────────────────────────────

/// Ordered resource quantities (e.g. `[cpu, ram]`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResourceVector(Vec<f64>);

impl ResourceVector {
    pub fn new(components: Vec<f64>) -> Self {
        Self(components)
    }

    /// Two-dimensional CPU/RAM vector.
    pub fn cpu_ram(cpu: f64, ram: f64) -> Self {
        Self(vec![cpu, ram])
    }

    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    pub fn components(&self) -> &[f64] {
        &self.0
    }

    pub fn dot(&self, other: &ResourceVector) -> f64 {
        self.0.iter().zip(&other.0).map(|(a, b)| a * b).sum()
    }

    /// Euclidean (L2) norm.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// True if every component of `self` is at most the matching
    /// component of `other`.
    pub fn fits_within(&self, other: &ResourceVector) -> bool {
        self.0.len() == other.0.len() && self.0.iter().zip(&other.0).all(|(d, a)| a >= d)
    }

    /// One finite, non-negative component per named resource.
    pub fn validate(
        &self,
        owner: &str,
        resources: &[String],
    ) -> Result<(), PlacementError> {
        if self.0.len() != resources.len() {
            return Err(PlacementError::DimensionMismatch {
                owner: owner.to_string(),
                expected: resources.len(),
                found: self.0.len(),
            });
        }
        for (value, resource) in self.0.iter().zip(resources) {
            if !value.is_finite() {
                return Err(PlacementError::NonFiniteQuantity {
                    owner: owner.to_string(),
                    resource: resource.clone(),
                });
            }
            if *value < 0.0 {
                return Err(PlacementError::NegativeQuantity {
                    owner: owner.to_string(),
                    resource: resource.clone(),
                    value: *value,
                });
            }
        }
        Ok(())
    }

    /// Component-wise `self -= other`. Callers check `other.fits_within(self)` first.
    fn consume(&mut self, other: &ResourceVector) {
        for (a, d) in self.0.iter_mut().zip(&other.0) {
            *a -= d;
        }
    }
}

impl From<Vec<f64>> for ResourceVector {
    fn from(components: Vec<f64>) -> Self {
        Self(components)
    }
}

// ── Service ────────────────────────────────────────────────────────

/// A workload to place. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    pub id: ServiceId,
    pub demand: ResourceVector,
}

impl Service {
    pub fn new(id: impl Into<ServiceId>, demand: impl Into<ResourceVector>) -> Self {
        Self {
            id: id.into(),
            demand: demand.into(),
        }
    }
}

// ── Server ─────────────────────────────────────────────────────────

/// A capacity-bounded server. `available` only ever decreases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Server {
    id: ServerId,
    capacity: ResourceVector,
    available: ResourceVector,
}

impl Server {
    pub fn new(id: impl Into<ServerId>, capacity: impl Into<ResourceVector>) -> Self {
        let capacity = capacity.into();
        Self {
            id: id.into(),
            available: capacity.clone(),
            capacity,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Starting capacity, as the server entered the pool.
    pub fn capacity(&self) -> &ResourceVector {
        &self.capacity
    }

    /// Remaining capacity after every assignment so far.
    pub fn available(&self) -> &ResourceVector {
        &self.available
    }

    /// Hard constraint: remaining capacity covers `demand` in every dimension.
    pub fn can_host(&self, demand: &ResourceVector) -> bool {
        demand.fits_within(&self.available)
    }

    /// Fraction of starting capacity consumed, per dimension.
    /// Dimensions with zero capacity report `0.0`.
    pub fn utilization(&self) -> Vec<f64> {
        self.capacity
            .components()
            .iter()
            .zip(self.available.components())
            .map(|(cap, avail)| if *cap > 0.0 { (cap - avail) / cap } else { 0.0 })
            .collect()
    }

    pub(crate) fn consume(&mut self, demand: &ResourceVector) {
        self.available.consume(demand);
    }
}

// ── ServerPool ─────────────────────────────────────────────────────

/// Servers in insertion order. Iteration order is the scoring order,
/// so it decides ties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerPool {
    resources: Vec<String>,
    servers: IndexMap<ServerId, Server>,
}

impl ServerPool {
    /// Empty pool over the named resource dimensions.
    pub fn new<I, S>(resources: I) -> Result<Self, PlacementError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let resources: Vec<String> = resources.into_iter().map(Into::into).collect();
        if resources.is_empty() {
            return Err(PlacementError::NoDimensions);
        }
        Ok(Self {
            resources,
            servers: IndexMap::new(),
        })
    }

    /// Append a server. Rejects duplicate ids and capacities that break
    /// the resource vector invariants.
    pub fn insert(&mut self, server: Server) -> Result<(), PlacementError> {
        if self.servers.contains_key(&server.id) {
            return Err(PlacementError::DuplicateServer(server.id));
        }
        server.capacity.validate(&server.id, &self.resources)?;
        self.servers.insert(server.id.clone(), server);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_server(mut self, server: Server) -> Result<Self, PlacementError> {
        self.insert(server)?;
        Ok(self)
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn get(&self, id: &str) -> Option<&Server> {
        self.servers.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Server> {
        self.servers.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Server> {
        self.servers.values()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

impl Default for ServerPool {
    fn default() -> Self {
        Self {
            resources: DEFAULT_RESOURCES.iter().map(|r| r.to_string()).collect(),
            servers: IndexMap::new(),
        }
    }
}

// ── PlacementResult ────────────────────────────────────────────────

/// Final state of a single service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Assignment {
    /// Hosted on `server`, chosen with the given similarity score.
    Placed { server: ServerId, score: f64 },
    /// No server had enough remaining capacity.
    Unplaced,
}

impl Assignment {
    pub fn server(&self) -> Option<&str> {
        match self {
            Assignment::Placed { server, .. } => Some(server),
            Assignment::Unplaced => None,
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, Assignment::Placed { .. })
    }
}

/// Service id → assignment, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PlacementResult {
    assignments: IndexMap<ServiceId, Assignment>,
}

impl PlacementResult {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            assignments: IndexMap::with_capacity(n),
        }
    }

    pub(crate) fn record(&mut self, service: &str, assignment: Assignment) {
        self.assignments.insert(service.to_string(), assignment);
    }

    pub fn get(&self, service: &str) -> Option<&Assignment> {
        self.assignments.get(service)
    }

    /// Server hosting `service`, if it was placed.
    pub fn server_for(&self, service: &str) -> Option<&str> {
        self.get(service).and_then(Assignment::server)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Assignment)> {
        self.assignments.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn placed_count(&self) -> usize {
        self.assignments.values().filter(|a| a.is_placed()).count()
    }

    /// Services that could not be placed, in processing order.
    pub fn unplaced(&self) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|(_, a)| !a.is_placed())
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Services hosted on `server`, in processing order.
    pub fn services_on(&self, server: &str) -> Vec<&str> {
        self.assignments
            .iter()
            .filter(|(_, a)| a.server() == Some(server))
            .map(|(id, _)| id.as_str())
            .collect()
    }
}
