//! Race subsystem.
//!
//! # Data Flow
//! ```text
//! LookupKey
//!     → coordinator.rs (fan out to every provider, start deadline)
//!     → providers (one fetch each, concurrently)
//!     → normalize.rs (record + source tag → Envelope)
//!     → coordinator.rs (first Envelope wins, else TimedOut)
//! ```
//!
//! # Design Decisions
//! - A provider's absence never ends the race on its own
//! - All-absent resolves immediately instead of waiting for the timer
//! - Nothing is shared between races except the immutable provider list

pub mod coordinator;
pub mod normalize;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{RaceCoordinator, RaceOutcome};
pub use normalize::{normalize, Envelope, UnifiedEnvelope};
