//! Portal route table, router and history-mode fallback server.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::PortalConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{NavigationTarget, ResolvedRoute, RouteTable, Router, RouterOptions, View};
