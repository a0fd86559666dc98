//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (配置、设置、文档来源、报告)
//!     ↓
//! workflow::ExtractionFlow (一次提取的完整流程)
//!     ↓
//! services (能力层：定位 / 提取 / 校验 / 去重 / 过滤 / 汇总)
//!     ↓
//! infrastructure (基础设施：PageHandle、DocumentSource)
//! ```
//!
//! 只有编排层持有 Browser 和文档来源

pub mod app;

pub use app::App;
