use serde::{Deserialize, Serialize};

/// GWA 评语
///
/// 按档位从低到高排列，派生的 `Ord` 即档位高低
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Remark {
    Fail,
    Average,
    Good,
    VeryGood,
    Distinction,
    HighDistinction,
}

impl Remark {
    /// 评语文本
    pub fn label(self) -> &'static str {
        match self {
            Remark::HighDistinction => "High Distinction",
            Remark::Distinction => "Distinction",
            Remark::VeryGood => "Very Good",
            Remark::Good => "Good",
            Remark::Average => "Average",
            Remark::Fail => "Fail",
        }
    }

    /// 对应的字母等级
    pub fn letter(self) -> &'static str {
        match self {
            Remark::HighDistinction => "A",
            Remark::Distinction => "B+",
            Remark::VeryGood => "B-",
            Remark::Good => "C+",
            Remark::Average => "C-",
            Remark::Fail => "F",
        }
    }
}

impl std::fmt::Display for Remark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.letter())
    }
}

/// 汇总结果
///
/// 每次调用重新计算，只读
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    /// 加权平均（完整精度）
    pub average: f64,
    pub total_units: f64,
    pub total_subjects: usize,
    pub total_weighted: f64,
    pub remark: Remark,
    /// 百分制档位，例如 "90-95"
    pub scale: &'static str,
}

impl AggregationResult {
    /// 两位小数的 GWA 文本
    pub fn average_text(&self) -> String {
        format!("{:.2}", self.average)
    }

    /// 两位小数的加权总和文本
    pub fn total_weighted_text(&self) -> String {
        format!("{:.2}", self.total_weighted)
    }

    /// 总学分为 0 的退化结果
    pub fn is_degenerate(&self) -> bool {
        self.total_units <= 0.0
    }
}
