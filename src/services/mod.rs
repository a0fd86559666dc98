pub mod aggregator;
pub mod category_filter;
pub mod dedup;
pub mod row_extractor;
pub mod table_locator;
pub mod validator;

pub use aggregator::{aggregate, classify};
pub use category_filter::{drop_in_progress, filter_categories, matches_category};
pub use dedup::dedup;
pub use row_extractor::RowExtractor;
pub use table_locator::TableLocator;
