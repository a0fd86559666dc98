//! 提取流程 - 流程层
//!
//! 核心职责：定义"一次提取"的完整流程
//!
//! 流程顺序：
//! 1. 表格定位 → 行提取 → 去重（得到原始提取结果）
//! 2. 去掉进行中课程 → 类别过滤
//! 3. 汇总
//!
//! 每次运行只读取传入的文档快照，不保留任何状态

use scraper::Html;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ConfigError, ExtractError};
use crate::models::{
    AggregationResult, CategorySet, DocumentSnapshot, ExtractionResult, GradeRecord,
};
use crate::services::{self, RowExtractor, TableLocator};

/// 提取结果的默认来源标识
pub const DEFAULT_SOURCE: &str = "content-script";

/// 一次完整运行的结果
#[derive(Debug, Clone)]
pub struct GwaReport {
    /// 原始提取结果（已校验、已去重，仍包含进行中的课程）
    pub extraction: ExtractionResult,
    /// 参与计算的记录
    pub counted: Vec<GradeRecord>,
    /// 汇总结果
    pub aggregation: AggregationResult,
    /// 本次生效的排除类别
    pub categories: CategorySet,
}

/// 提取流程
///
/// - 编排各个纯函数阶段
/// - 把退化结果翻译成提取错误
/// - 不持有任何浏览器资源
pub struct ExtractionFlow {
    locator: TableLocator,
    rows: RowExtractor,
    source: String,
}

impl ExtractionFlow {
    /// 使用指定的候选表格选择器创建
    pub fn new(table_selector: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            locator: TableLocator::new(table_selector)?,
            rows: RowExtractor::new()?,
            source: DEFAULT_SOURCE.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(&config.table_selector)
    }

    /// 设置来源标识
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// 定位表格并提取去重后的记录
    ///
    /// 文档中没有候选表格时返回 `None`
    fn extract_records(&self, html: &str) -> Option<Vec<GradeRecord>> {
        let document = Html::parse_document(html);
        let table = self.locator.locate(&document)?;
        let records = self.rows.extract(table);
        let total = records.len();
        let records = services::dedup(records);
        if records.len() < total {
            debug!("去除 {} 条重复记录", total - records.len());
        }
        Some(records)
    }

    /// 原始提取：校验 + 去重
    ///
    /// 没有候选表格时返回 [`ExtractError::NoTableFound`]
    pub fn extract(&self, snapshot: &DocumentSnapshot) -> Result<ExtractionResult, ExtractError> {
        let records = self
            .extract_records(&snapshot.html)
            .ok_or(ExtractError::NoTableFound)?;
        Ok(ExtractionResult::new(records, &self.source, &snapshot.url))
    }

    /// 同 [`extract`](Self::extract)，但没有表格时视为零条记录
    pub fn extract_lenient(&self, snapshot: &DocumentSnapshot) -> ExtractionResult {
        let records = self.extract_records(&snapshot.html).unwrap_or_default();
        ExtractionResult::new(records, &self.source, &snapshot.url)
    }

    /// 运行完整流程
    pub fn run(
        &self,
        snapshot: &DocumentSnapshot,
        categories: CategorySet,
    ) -> Result<GwaReport, ExtractError> {
        let extraction = self.extract(snapshot)?;
        info!("✓ 提取到 {} 条成绩记录", extraction.len());

        if extraction.is_empty() {
            return Err(ExtractError::NoValidRecords);
        }

        let counted = counted_records(extraction.grades.clone(), &categories);
        debug!(
            "排除类别 [{}] 后剩余 {} 条记录参与计算",
            categories,
            counted.len()
        );

        let aggregation = services::aggregate(&counted);
        if aggregation.is_degenerate() {
            return Err(ExtractError::EmptyAfterAggregation);
        }

        Ok(GwaReport {
            extraction,
            counted,
            aggregation,
            categories,
        })
    }
}

/// 汇总前的过滤：去掉进行中课程，再去掉生效类别的课程
pub fn counted_records(records: Vec<GradeRecord>, categories: &CategorySet) -> Vec<GradeRecord> {
    let records = services::drop_in_progress(records);
    services::filter_categories(records, categories)
}

/// 检查文档是否来自目标站点
pub fn ensure_target_site(url: &str, target_host: &str) -> Result<(), ExtractError> {
    if url.contains(target_host) {
        Ok(())
    } else {
        Err(ExtractError::WrongSite {
            url: url.to_string(),
        })
    }
}
