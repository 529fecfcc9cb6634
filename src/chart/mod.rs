mod cache;
mod entry;
mod resolver;
mod service;

pub use cache::{ChartCache, ResolvedChart};
pub use entry::{ChartEntry, Movement};
pub use resolver::{resolve, try_resolve, ConversionError, MAX_CHART_ENTRIES};
pub use service::{ChartLookup, ChartService};
