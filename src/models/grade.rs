use serde::{Deserialize, Serialize};

/// 单门课程的成绩记录
///
/// 由行提取器按文档行创建，创建后不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
    /// 课程代码，非空且已去除首尾空白
    #[serde(rename = "subject")]
    pub subject_code: String,
    /// 课程标题
    pub title: String,
    /// 成绩，取值范围 [0, 5]，0 表示课程进行中
    pub grade: f64,
    /// 学分，取值范围 (0, 10]
    pub units: f64,
}

impl GradeRecord {
    pub fn new(
        subject_code: impl Into<String>,
        title: impl Into<String>,
        grade: f64,
        units: f64,
    ) -> Self {
        Self {
            subject_code: subject_code.into(),
            title: title.into(),
            grade,
            units,
        }
    }

    /// 成绩 × 学分
    pub fn weighted(&self) -> f64 {
        self.grade * self.units
    }

    /// 是否为已完成的课程（成绩和学分都大于 0）
    pub fn is_completed(&self) -> bool {
        self.grade > 0.0 && self.units > 0.0
    }
}

impl std::fmt::Display for GradeRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {:.2} | {} units",
            self.subject_code, self.title, self.grade, self.units
        )
    }
}
