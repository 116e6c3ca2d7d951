//! # scan-telemetry
//!
//! The scan's observability surface: the `Session` progress-reporting
//! boundary and `tracing` subscriber bootstrap. The heavier production
//! telemetry backend (metrics export, distributed tracing) is an external
//! collaborator; this crate defines the trait boundary and the two
//! implementations a library consumer or test needs.

pub mod logging;
pub mod session;

pub use logging::init_logging;
pub use session::{NullSession, Session, TracingSession};
