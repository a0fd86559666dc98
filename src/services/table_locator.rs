//! 表格定位 - 业务能力层
//!
//! 从文档的所有候选表格中选出成绩表

use crate::error::ConfigError;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// 默认的候选表格选择器
pub const DEFAULT_TABLE_SELECTOR: &str = "table.table";

/// 表格定位器
///
/// 优先选择同时包含表头（thead）和表体（tbody）的表格，
/// 否则退回到文档顺序中的第一个表格
pub struct TableLocator {
    table: Selector,
    thead: Selector,
    tbody: Selector,
}

impl TableLocator {
    /// 使用自定义候选选择器创建
    pub fn new(table_selector: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            table: parse_selector(table_selector)?,
            thead: parse_selector("thead")?,
            tbody: parse_selector("tbody")?,
        })
    }

    /// 文档顺序中的所有候选表格
    pub fn candidates<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document.select(&self.table).collect()
    }

    /// 选出要解析的表格，没有任何候选时返回 `None`
    pub fn locate<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        let candidates = self.candidates(document);
        debug!("找到 {} 个候选表格", candidates.len());

        let structured = candidates.iter().position(|t| self.has_head_and_body(t));
        match structured {
            Some(idx) => {
                debug!("选择第 {} 个表格 (包含 thead 和 tbody)", idx + 1);
                Some(candidates[idx])
            }
            None => {
                let first = candidates.first().copied();
                if first.is_some() {
                    debug!("没有同时包含 thead 和 tbody 的表格，退回第一个表格");
                }
                first
            }
        }
    }

    fn has_head_and_body(&self, table: &ElementRef<'_>) -> bool {
        table.select(&self.thead).next().is_some() && table.select(&self.tbody).next().is_some()
    }
}

pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|_| ConfigError::InvalidSelector {
        selector: selector.to_string(),
    })
}
