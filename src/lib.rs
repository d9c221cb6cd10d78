//! CEP gateway library: races postal-code lookups across upstream providers.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod lookup;
pub mod observability;
pub mod providers;
pub mod race;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use lookup::LookupKey;
pub use race::{Envelope, RaceCoordinator, RaceOutcome};
