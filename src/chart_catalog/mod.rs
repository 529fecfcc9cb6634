mod catalog;
mod columns;
mod load;
mod models;
mod window;

pub use catalog::ChartCatalog;
pub use columns::{AudioFeatureColumns, ChartColumns};
pub use load::{parse_week_id, CatalogLoader, DatasetFiles, LoadError};
pub use models::{AudioFeatures, ChartRow};
pub use window::DateWindow;
