pub mod aggregation;
pub mod category;
pub mod extraction;
pub mod grade;
pub mod loaders;
pub mod settings;

pub use aggregation::{AggregationResult, Remark};
pub use category::{Category, CategorySet};
pub use extraction::{DocumentSnapshot, ExtractionResult};
pub use grade::GradeRecord;
pub use loaders::SettingsStore;
pub use settings::Settings;
