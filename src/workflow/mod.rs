pub mod extraction_flow;

pub use extraction_flow::{counted_records, ensure_target_site, ExtractionFlow, GwaReport};
