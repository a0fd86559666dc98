use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::grade::GradeRecord;

/// 文档快照
///
/// 每次运行只获取一次，流水线各阶段只读取它
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    /// 文档来源 URL（离线文件模式下为 file:// 路径）
    pub url: String,
    /// 完整 HTML
    pub html: String,
}

impl DocumentSnapshot {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

/// 提取结果
///
/// 有序的成绩记录加上来源信息，由接收方独占
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub grades: Vec<GradeRecord>,
    /// 来源标识，例如 "content-script" 或 "file"
    pub source: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

impl ExtractionResult {
    pub fn new(
        grades: Vec<GradeRecord>,
        source: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            grades,
            source: source.into(),
            url: url.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    pub fn len(&self) -> usize {
        self.grades.len()
    }
}
