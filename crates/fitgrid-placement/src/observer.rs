//! Observer hooks for the placement engine.
//!
//! The engine reports each step of a run (candidate checks, scores,
//! decisions) as a [`PlacementEvent`]. Observers never influence the
//! outcome; they exist for tracing, narration, and tests.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::types::{ResourceVector, ServerId, ServiceId};

/// A single step of a placement run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlacementEvent {
    /// The engine started searching for a server for `service`.
    ServiceStarted {
        service: ServiceId,
        demand: ResourceVector,
    },
    /// `server` lacks remaining capacity in at least one dimension.
    CandidateRejected {
        service: ServiceId,
        server: ServerId,
        available: ResourceVector,
    },
    /// `server` can host `service` and was scored.
    CandidateScored {
        service: ServiceId,
        server: ServerId,
        available: ResourceVector,
        score: f64,
    },
    /// `service` was assigned; `remaining` is the server's capacity after
    /// the assignment.
    ServicePlaced {
        service: ServiceId,
        server: ServerId,
        score: f64,
        remaining: ResourceVector,
    },
    /// No server could host `service`.
    ServiceUnplaced { service: ServiceId },
}

impl PlacementEvent {
    pub fn service(&self) -> &str {
        match self {
            PlacementEvent::ServiceStarted { service, .. }
            | PlacementEvent::CandidateRejected { service, .. }
            | PlacementEvent::CandidateScored { service, .. }
            | PlacementEvent::ServicePlaced { service, .. }
            | PlacementEvent::ServiceUnplaced { service } => service,
        }
    }
}

/// Receives events from a placement run, in order.
pub trait PlacementObserver {
    fn on_event(&mut self, event: &PlacementEvent);
}

impl<F> PlacementObserver for F
where
    F: FnMut(&PlacementEvent),
{
    fn on_event(&mut self, event: &PlacementEvent) {
        self(event)
    }
}

/// Logs every event through `tracing`: candidate checks at `debug`,
/// placements at `info`, unplaced services at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PlacementObserver for TracingObserver {
    fn on_event(&mut self, event: &PlacementEvent) {
        match event {
            PlacementEvent::ServiceStarted { service, demand } => {
                debug!(service = %service, demand = ?demand.components(), "searching for server");
            }
            PlacementEvent::CandidateRejected {
                service,
                server,
                available,
            } => {
                debug!(
                    service = %service,
                    server = %server,
                    available = ?available.components(),
                    "insufficient resources"
                );
            }
            PlacementEvent::CandidateScored {
                service,
                server,
                available,
                score,
            } => {
                debug!(
                    service = %service,
                    server = %server,
                    available = ?available.components(),
                    score,
                    "scored candidate"
                );
            }
            PlacementEvent::ServicePlaced {
                service,
                server,
                score,
                remaining,
            } => {
                info!(
                    service = %service,
                    server = %server,
                    score,
                    remaining = ?remaining.components(),
                    "placed service"
                );
            }
            PlacementEvent::ServiceUnplaced { service } => {
                warn!(service = %service, "no server has enough remaining capacity");
            }
        }
    }
}

/// Records every event for later inspection.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<PlacementEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PlacementEvent] {
        &self.events
    }

    /// Events belonging to one service, in order.
    pub fn for_service<'a>(&'a self, service: &'a str) -> impl Iterator<Item = &'a PlacementEvent> {
        self.events.iter().filter(move |e| e.service() == service)
    }

    pub fn into_events(self) -> Vec<PlacementEvent> {
        self.events
    }
}

impl PlacementObserver for EventLog {
    fn on_event(&mut self, event: &PlacementEvent) {
        self.events.push(event.clone());
    }
}
