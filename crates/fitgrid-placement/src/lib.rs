//! fitgrid placement — sequential best-fit by cosine similarity.
//!
//! Places an ordered list of services onto an ordered pool of
//! capacity-bounded servers. Each service goes to the feasible server
//! whose *remaining* capacity points in the direction closest to the
//! service's demand; that server's capacity is then reduced, so later
//! services see what earlier ones left behind.
//!
//! # Components
//!
//! - **`scorer`** — Cosine similarity between demand and remaining capacity
//! - **`placer`** — Placement engine (feasibility, selection, depletion)
//! - **`observer`** — Structured per-step events for tracing and narration
//! - **`types`** — Resource vectors, services, servers, pool, results
//! - **`convert`** — Type conversions from inventory config
//!
//! # Example
//!
//! ```
//! use fitgrid_placement::{Server, ServerPool, Service, place};
//!
//! let pool = ServerPool::default()
//!     .with_server(Server::new("small", vec![4.0, 4.0]))?
//!     .with_server(Server::new("large", vec![8.0, 16.0]))?;
//! let services = vec![Service::new("web", vec![2.0, 2.0])];
//!
//! let outcome = place(&services, pool)?;
//! assert_eq!(outcome.result.server_for("web"), Some("small"));
//! # Ok::<(), fitgrid_placement::PlacementError>(())
//! ```

pub mod convert;
pub mod error;
pub mod observer;
pub mod placer;
pub mod scorer;
pub mod types;

pub use convert::{inventory_to_inputs, pool_from_inventory, server_from_config, service_from_config};
pub use error::PlacementError;
pub use observer::{EventLog, PlacementEvent, PlacementObserver, TracingObserver};
pub use placer::{PlacementOutcome, place, place_with_observer, validate};
pub use scorer::{SCORE_SENTINEL, score};
pub use types::{Assignment, PlacementResult, ResourceVector, Server, ServerId, ServerPool, Service, ServiceId};
