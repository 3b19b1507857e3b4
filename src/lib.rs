//! Data pipeline behind a task-review audit dashboard: load a malformed CSV
//! of freelance reviews, normalize and classify each row, then expose pure
//! filtering, aggregation, and export functions for the presentation layer.

/// Domain classification rules and shared case folding.
pub mod classify;
/// Dataset assembly, exclusion rule, and content-keyed caching.
pub mod dataset;
/// CSV export of a filtered view.
pub mod export;
/// Query/filter engine.
pub mod filter;
/// Cumulative, monthly, keyword, and rating aggregates.
pub mod metrics;
/// Core data model.
pub mod models;
/// Field typing.
pub mod normalize;
/// Row parser for the five-field source pattern.
pub mod parse;
/// Chart-ready JSON export for the analytics tab.
pub mod viz_export;

pub use classify::classify;
pub use dataset::{load_path, load_str, DatasetCache};
pub use filter::{apply, available_categories, FilterSpec, FilteredView};
pub use metrics::{cumulative_by_date, keyword_frequency, DEFAULT_KEYWORD_GROUPS};
pub use models::{Dataset, Domain, ParsedRecord, Record};
pub use normalize::normalize;
pub use parse::parse_line;
