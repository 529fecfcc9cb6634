//! Billboard Chart Server Library
//!
//! Monthly Hot 100 lookups over a static dataset. This library exposes the
//! internal modules for the binaries and for testing.

pub mod chart;
pub mod chart_catalog;
pub mod config;
pub mod query;
pub mod search_link;
pub mod server;

// Re-export commonly used types for convenience
pub use chart::{ChartEntry, ChartLookup, ChartService};
pub use chart_catalog::{CatalogLoader, ChartCatalog, DateWindow, LoadError};
pub use query::{validate, ValidationError};
pub use search_link::build_search_reference;
pub use server::{run_server, RequestsLoggingLevel};
