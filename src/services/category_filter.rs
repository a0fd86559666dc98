//! 类别过滤 - 业务能力层
//!
//! 每个类别是一条作用于 (课程代码, 标题) 的固定规则，忽略大小写。
//! 任一生效类别命中即丢弃该记录。

use crate::models::{Category, CategorySet, GradeRecord};
use regex::Regex;
use std::sync::LazyLock;

/// 单个类别的匹配规则
struct CategoryRule {
    /// 课程代码前缀
    code_prefix: &'static str,
    /// 标题关键词（大写）
    title_markers: &'static [&'static str],
    /// 额外的课程代码模式
    code_pattern: Option<&'static LazyLock<Regex>>,
}

/// 课程代码中独立的 PE 记号
static PE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bPE\b").unwrap());

static PE_RULE: CategoryRule = CategoryRule {
    code_prefix: "PAHF",
    title_markers: &[
        "PHYSICAL EDUCATION",
        "DANCE AND SPORTS",
        "EXERCISE-BASED FITNESS",
        "MOVEMENT COMPETENCY",
    ],
    code_pattern: Some(&PE_TOKEN),
};

static NSTP_RULE: CategoryRule = CategoryRule {
    code_prefix: "NSTP",
    title_markers: &["NATIONAL SERVICE TRAINING PROGRAM"],
    code_pattern: None,
};

impl CategoryRule {
    fn for_category(category: Category) -> &'static CategoryRule {
        match category {
            Category::PhysicalEducation => &PE_RULE,
            Category::ServiceProgram => &NSTP_RULE,
        }
    }

    fn matches(&self, code: &str, title: &str) -> bool {
        code.starts_with(self.code_prefix)
            || self.code_pattern.is_some_and(|re| re.is_match(code))
            || self.title_markers.iter().any(|m| title.contains(m))
    }
}

/// 判断记录是否属于某个类别
pub fn matches_category(record: &GradeRecord, category: Category) -> bool {
    let code = record.subject_code.to_uppercase();
    let title = record.title.to_uppercase();
    CategoryRule::for_category(category).matches(&code, &title)
}

/// 返回不属于任何生效类别的记录，保持原顺序
pub fn filter_categories(records: Vec<GradeRecord>, categories: &CategorySet) -> Vec<GradeRecord> {
    if categories.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| !categories.iter().any(|c| matches_category(r, c)))
        .collect()
}

/// 去掉进行中的课程（成绩为 0 或学分为 0）
///
/// 在汇总之前调用；提取结果本身仍保留这些课程
pub fn drop_in_progress(records: Vec<GradeRecord>) -> Vec<GradeRecord> {
    records.into_iter().filter(GradeRecord::is_completed).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(code: &str, title: &str) -> GradeRecord {
        GradeRecord::new(code, title, 2.0, 3.0)
    }

    fn is_pe(code: &str, title: &str) -> bool {
        matches_category(&rec(code, title), Category::PhysicalEducation)
    }

    fn is_nstp(code: &str, title: &str) -> bool {
        matches_category(&rec(code, title), Category::ServiceProgram)
    }

    #[test]
    fn test_pe_code_prefix() {
        assert!(is_pe("PAHF101", "PE 1"));
        assert!(is_pe("pahf 2", "Anything"));
        assert!(!is_pe("XPAHF", "Anything"));
    }

    #[test]
    fn test_pe_standalone_token() {
        assert!(is_pe("PE 101", "Fitness"));
        assert!(is_pe("GE-PE 2", "Fitness"));
        assert!(!is_pe("pe3", "Fitness"));
        assert!(!is_pe("PEOPLE1", "Society"));
        assert!(!is_pe("SPED 1", "Special Education"));
    }

    #[test]
    fn test_pe_title_markers() {
        assert!(is_pe("GEC1", "Physical Education 1"));
        assert!(is_pe("GEC2", "Rhythmic Activities: Dance and Sports"));
        assert!(is_pe("GEC3", "Exercise-Based Fitness Activities"));
        assert!(is_pe("GEC4", "Movement Competency Training"));
        assert!(!is_pe("GEC5", "Purposive Communication"));
    }

    #[test]
    fn test_nstp_rules() {
        assert!(is_nstp("NSTP1", "CWTS 1"));
        assert!(is_nstp("CWTS1", "National Service Training Program 1"));
        assert!(!is_nstp("CS101", "Intro"));
        assert!(!is_nstp("PAHF101", "PE 1"));
    }

    #[test]
    fn test_filter_with_no_active_categories_keeps_all() {
        let input = vec![rec("PAHF101", "PE 1"), rec("NSTP1", "CWTS")];
        assert_eq!(filter_categories(input.clone(), &CategorySet::none()), input);
    }

    #[test]
    fn test_filter_is_or_across_categories() {
        let input = vec![
            rec("PAHF101", "PE 1"),
            rec("CS101", "Intro"),
            rec("NSTP1", "CWTS"),
        ];

        let pe_only = filter_categories(input.clone(), &CategorySet::from_flags(true, false));
        assert_eq!(pe_only, vec![rec("CS101", "Intro"), rec("NSTP1", "CWTS")]);

        let both = filter_categories(input, &CategorySet::from_flags(true, true));
        assert_eq!(both, vec![rec("CS101", "Intro")]);
    }

    #[test]
    fn test_drop_in_progress() {
        let input = vec![
            GradeRecord::new("CS101", "Intro", 0.0, 3.0),
            GradeRecord::new("CS102", "Data", 2.5, 3.0),
        ];
        assert_eq!(
            drop_in_progress(input),
            vec![GradeRecord::new("CS102", "Data", 2.5, 3.0)]
        );
    }
}
