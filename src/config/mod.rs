//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (BASE_URL, ROUTER_HISTORY)
//!     → validation.rs (semantic checks)
//!     → PortalConfig (validated, immutable)
//!     → RouterOptions for the single Router built at startup
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; the router never changes afterwards
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::HistoryConfig;
pub use schema::HistoryKind;
pub use schema::ObservabilityConfig;
pub use schema::PortalConfig;
pub use schema::ServerConfig;
