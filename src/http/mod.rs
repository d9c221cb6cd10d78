//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, tracing span)
//!     → lookup.rs (key extraction & validation, race, format selection)
//!     → response.rs (envelope or error → status + body)
//!     → Send to client
//! ```

pub mod lookup;
pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::LookupError;
pub use server::{AppState, HttpServer};
