//! Route inference over a triple store.
//!
//! The [`Orchestrator`] runs the fixed rule set of [`skigraph_rules`] through a
//! [`TripleStoreGateway`](skigraph_common::TripleStoreGateway), driving every iterated rule to its
//! fixed point with the [`FixpointRunner`].
//!
//! ```no_run
//! use skigraph_engine::{InferenceConfig, Orchestrator};
//! # async fn infer(gateway: &dyn skigraph_common::TripleStoreGateway) -> Result<(), skigraph_engine::InferenceError> {
//! let report = Orchestrator::new(gateway, InferenceConfig::default()).run().await?;
//! for phase in &report.phases {
//!     println!("{}: {} new facts", phase.phase, phase.derived());
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod fixpoint;
mod orchestrator;

pub use config::{InferenceConfig, DEFAULT_MAX_ITERATIONS};
pub use error::{ClosureError, InferenceError};
pub use fixpoint::{ClosureStats, FixpointRunner, GatewayRule, MonotonicRule};
pub use orchestrator::{InferenceReport, Orchestrator, Phase, PhaseReport};
