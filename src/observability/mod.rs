//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Providers, race coordinator, HTTP layer produce:
//!     → logging.rs (structured tracing events, request ID in spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout log stream
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
