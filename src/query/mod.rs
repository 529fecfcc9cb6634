mod format;
mod parse;
mod validation;

pub use format::{chart_key, display_month, month_name};
pub use parse::{ChartQuery, ChartQueryParseError};
pub use validation::{validate, ValidationError};
