//! 记录校验 - 业务能力层
//!
//! 纯函数：原始单元格文本 → 合法记录或拒绝

use crate::models::GradeRecord;
use regex::Regex;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

/// 成绩合法范围（闭区间）
pub const GRADE_RANGE: RangeInclusive<f64> = 0.0..=5.0;

/// 单门课程学分上限，超过视为单元格错位
pub const MAX_UNITS: f64 = 10.0;

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").unwrap());

/// 读取单元格开头的十进制数
///
/// `"3.0 units"` → 3.0；开头不是数字或结果不是有限数时返回 `None`。
/// `"-0"` 读作 `0.0`
pub fn parse_number(cell: &str) -> Option<f64> {
    let m = LEADING_NUMBER.find(cell.trim())?;
    m.as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v + 0.0)
}

/// 校验一行候选数据
///
/// 以下任一条件成立即拒绝：
/// - 课程代码或标题去除空白后为空
/// - 成绩或学分不是数字
/// - 成绩不在 [0, 5]
/// - 学分不在 (0, 10]
pub fn validate(code: &str, title: &str, grade: &str, units: &str) -> Option<GradeRecord> {
    let code = code.trim();
    let title = title.trim();
    if code.is_empty() || title.is_empty() {
        return None;
    }

    let grade = parse_number(grade)?;
    let units = parse_number(units)?;

    if !GRADE_RANGE.contains(&grade) {
        return None;
    }
    if units <= 0.0 || units > MAX_UNITS {
        return None;
    }

    Some(GradeRecord::new(code, title, grade, units))
}
