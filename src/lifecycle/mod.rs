//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Parse CLI → Load config → Init logging/metrics → Build providers → Bind → Serve
//!
//! Shutdown:
//!     Ctrl+C or Shutdown::trigger → stop accepting → drain in-flight lookups → exit
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
