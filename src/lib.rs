//! # SPR GWA
//!
//! 从 SPR（学生永久记录）页面提取成绩，计算加权平均（GWA）和评语
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 连接浏览器、查找活动页面、启动无头浏览器
//! - `infrastructure/` - `PageHandle` 持有页面，`DocumentSource` 提供文档快照
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 纯函数，每个流水线阶段一个模块
//! - 校验 → 表格定位 → 行提取 → 去重 → 类别过滤 → 汇总
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - `ExtractionFlow` 把各阶段串起来，并把退化结果翻译成错误
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 读取配置和设置、解析文档来源、输出报告
//!
//! ### 消息接口
//! - `api/` - `extractGrades` / `calculateGWA` / `getSettings` / `saveSettings`

pub mod api;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, ExtractError};
pub use models::{AggregationResult, CategorySet, DocumentSnapshot, ExtractionResult, GradeRecord};
pub use orchestrator::App;
pub use workflow::{ExtractionFlow, GwaReport};
