//! 去重 - 业务能力层

use crate::models::GradeRecord;
use std::collections::HashSet;

/// 去重键：(课程代码, 标题, 学分, 成绩)
///
/// 浮点数按位比较；`-0.0` 先归一为 `0.0`，与 `==` 的结果一致
type DedupKey<'a> = (&'a str, &'a str, u64, u64);

fn number_bits(value: f64) -> u64 {
    (value + 0.0).to_bits()
}

fn key(record: &GradeRecord) -> DedupKey<'_> {
    (
        record.subject_code.as_str(),
        record.title.as_str(),
        number_bits(record.units),
        number_bits(record.grade),
    )
}

/// 去掉完全重复的记录
///
/// 第一次出现的记录保留，保持首次出现的顺序
pub fn dedup(records: Vec<GradeRecord>) -> Vec<GradeRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    let keep: Vec<bool> = records.iter().map(|r| seen.insert(key(r))).collect();

    records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::validator::validate;

    fn rec(code: &str, title: &str, grade: f64, units: f64) -> GradeRecord {
        GradeRecord::new(code, title, grade, units)
    }

    #[test]
    fn test_removes_exact_repeats() {
        let out = dedup(vec![
            rec("CS101", "Intro", 1.5, 3.0),
            rec("CS101", "Intro", 1.5, 3.0),
        ]);
        assert_eq!(out, vec![rec("CS101", "Intro", 1.5, 3.0)]);
    }

    #[test]
    fn test_any_differing_field_keeps_both() {
        let input = vec![
            rec("CS101", "Intro", 1.5, 3.0),
            rec("CS101", "Intro", 2.0, 3.0),
            rec("CS101", "Intro", 1.5, 2.0),
            rec("CS101", "Intro II", 1.5, 3.0),
            rec("CS102", "Intro", 1.5, 3.0),
        ];
        assert_eq!(dedup(input.clone()), input);
    }

    #[test]
    fn test_first_occurrence_order_is_preserved() {
        let out = dedup(vec![
            rec("B", "b", 2.0, 3.0),
            rec("A", "a", 1.0, 3.0),
            rec("B", "b", 2.0, 3.0),
            rec("C", "c", 3.0, 3.0),
            rec("A", "a", 1.0, 3.0),
        ]);
        let codes: Vec<&str> = out.iter().map(|r| r.subject_code.as_str()).collect();
        assert_eq!(codes, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_idempotent() {
        let input = vec![
            rec("A", "a", 1.0, 3.0),
            rec("A", "a", 1.0, 3.0),
            rec("B", "b", 2.0, 1.0),
            rec("A", "a", 1.0, 3.0),
        ];
        let once = dedup(input);
        let twice = dedup(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_output_is_subsequence_of_input() {
        let input: Vec<GradeRecord> = (0..30)
            .map(|i| rec(&format!("C{}", i % 7), "t", f64::from(i % 3), 3.0))
            .collect();
        let out = dedup(input.clone());

        let mut it = input.iter();
        for r in &out {
            assert!(it.any(|x| x == r), "输出不是输入的子序列");
        }
    }

    #[test]
    fn test_signed_zero_grade_is_a_repeat() {
        let zero = validate("CS101", "Intro", "0", "3").unwrap();
        let negative_zero = validate("CS101", "Intro", "-0", "3").unwrap();
        assert_eq!(zero, negative_zero);

        let out = dedup(vec![zero.clone(), negative_zero]);
        assert_eq!(out, vec![zero]);
        assert!(out[0].grade.is_sign_positive());
    }

    #[test]
    fn test_same_number_written_differently_is_a_repeat() {
        let out = dedup(vec![
            validate("CS101", "Intro", "1.5", "3").unwrap(),
            validate("CS101", "Intro", "1.50", "3.0").unwrap(),
        ]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedup(Vec::new()).is_empty());
    }
}
