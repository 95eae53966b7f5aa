//! Placement engine — sequential best-fit by cosine similarity.
//!
//! For each service, in input order:
//! 1. Filter servers whose remaining capacity covers the demand in every
//!    dimension (hard constraint; infeasible servers are never scored)
//! 2. Score each candidate with [`scorer::score`]
//! 3. Keep the first candidate with the strictly highest score
//! 4. Subtract the demand from the winner, or record the service as unplaced
//!
//! Later services see the capacity left behind by earlier ones. There is
//! no backtracking. Cost is O(services × servers).

use std::collections::HashSet;

use serde::Serialize;
use tracing::info;

use crate::error::PlacementError;
use crate::observer::{PlacementEvent, PlacementObserver, TracingObserver};
use crate::scorer::{self, SCORE_SENTINEL};
use crate::types::{Assignment, PlacementResult, ServerId, ServerPool, Service};

/// Result of a full run: the per-service assignments and the pool with
/// every assignment subtracted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementOutcome {
    pub result: PlacementResult,
    pub pool: ServerPool,
}

/// Reject inputs that would make scores meaningless: services with the
/// wrong number of dimensions, negative or non-finite demands, and
/// duplicate service ids.
///
/// Server capacities are checked when servers enter the pool.
pub fn validate(services: &[Service], pool: &ServerPool) -> Result<(), PlacementError> {
    let mut seen = HashSet::with_capacity(services.len());
    for service in services {
        if !seen.insert(service.id.as_str()) {
            return Err(PlacementError::DuplicateService(service.id.clone()));
        }
        service.demand.validate(&service.id, pool.resources())?;
    }
    Ok(())
}

/// Place `services` onto `pool` in order, logging each step through
/// [`TracingObserver`].
pub fn place(services: &[Service], pool: ServerPool) -> Result<PlacementOutcome, PlacementError> {
    place_with_observer(services, pool, &mut TracingObserver)
}

/// Place `services` onto `pool` in order, reporting every step to `observer`.
///
/// Input is validated in full before any server is touched, so on error
/// no scoring has happened.
pub fn place_with_observer<O>(
    services: &[Service],
    mut pool: ServerPool,
    observer: &mut O,
) -> Result<PlacementOutcome, PlacementError>
where
    O: PlacementObserver + ?Sized,
{
    validate(services, &pool)?;

    let mut result = PlacementResult::with_capacity(services.len());

    for service in services {
        observer.on_event(&PlacementEvent::ServiceStarted {
            service: service.id.clone(),
            demand: service.demand.clone(),
        });

        let selected = select_server(service, &pool, observer)
            .and_then(|(id, score)| pool.get_mut(&id).map(|server| (server, score)));

        match selected {
            Some((server, score)) => {
                server.consume(&service.demand);
                observer.on_event(&PlacementEvent::ServicePlaced {
                    service: service.id.clone(),
                    server: server.id().to_string(),
                    score,
                    remaining: server.available().clone(),
                });
                result.record(
                    &service.id,
                    Assignment::Placed {
                        server: server.id().to_string(),
                        score,
                    },
                );
            }
            None => {
                observer.on_event(&PlacementEvent::ServiceUnplaced {
                    service: service.id.clone(),
                });
                result.record(&service.id, Assignment::Unplaced);
            }
        }
    }

    info!(
        services = result.len(),
        placed = result.placed_count(),
        unplaced = result.len() - result.placed_count(),
        "placement complete"
    );

    Ok(PlacementOutcome { result, pool })
}

/// Best feasible server for `service`, with its score. Ties go to the
/// server that comes first in pool order.
fn select_server<O>(
    service: &Service,
    pool: &ServerPool,
    observer: &mut O,
) -> Option<(ServerId, f64)>
where
    O: PlacementObserver + ?Sized,
{
    let mut best: Option<&str> = None;
    let mut max_score = SCORE_SENTINEL;

    for server in pool.iter() {
        if !server.can_host(&service.demand) {
            observer.on_event(&PlacementEvent::CandidateRejected {
                service: service.id.clone(),
                server: server.id().to_string(),
                available: server.available().clone(),
            });
            continue;
        }

        let score = scorer::score(&service.demand, server.available());
        observer.on_event(&PlacementEvent::CandidateScored {
            service: service.id.clone(),
            server: server.id().to_string(),
            available: server.available().clone(),
            score,
        });

        if score > max_score {
            max_score = score;
            best = Some(server.id());
        }
    }

    best.map(|id| (id.to_string(), max_score))
}
