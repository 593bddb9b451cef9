//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing and navigation produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and histograms via the metrics facade)
//!
//! Consumers:
//!     → stderr (fmt layer, filtered by RUST_LOG or config)
//!     → whatever metrics recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (`path = %p`) rather than formatted messages
//! - Metrics are cheap and optional

pub mod logging;
pub mod metrics;
