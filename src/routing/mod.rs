//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Browser URL
//!     → history.rs (strip base / read fragment, split query)
//!     → table.rs (first matching route, in declaration order)
//!     → pattern.rs (segment matching, parameter capture)
//!     → router.rs (ResolvedRoute: name, view, params, href)
//!     → navigator.rs (session history: push / replace / back)
//!
//! Table Compilation (at startup):
//!     (path, name, view)[]
//!     → Parse patterns
//!     → Check unique names, catch-all last
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex (static, `:param` and catch-all segments only)
//! - Deterministic: same input always resolves to the same route
//! - First match wins; unmatched paths land on the catch-all

pub mod history;
pub mod navigator;
pub mod pattern;
pub mod route;
pub mod router;
pub mod table;

pub use history::{HistoryMode, Location, Query};
pub use navigator::Navigator;
pub use pattern::{MatchOptions, ParamValue, Params, PathPattern};
pub use route::{Route, View};
pub use router::{NavigationError, NavigationTarget, ResolvedRoute, Router, RouterOptions};
pub use table::{RouteTable, TableError};
