//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router, navigator and server produce:
//!     → tracing events with structured fields (route, path, request_id)
//!     → logging.rs (subscriber: env filter + pretty or JSON formatter)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID recorded on every server span

pub mod logging;
