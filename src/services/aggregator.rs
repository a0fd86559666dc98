//! 汇总 - 业务能力层
//!
//! 计算加权平均（GWA）并查表得到评语和百分制档位。
//! 对任意输入（包括空序列）都返回结果，从不失败。

use crate::models::{AggregationResult, GradeRecord, Remark};

/// 分档表：下限（含），自上而下匹配，第一个满足的档位生效
const BANDS: [(f64, Remark, &str); 5] = [
    (4.0, Remark::HighDistinction, "96-100"),
    (3.5, Remark::Distinction, "90-95"),
    (3.0, Remark::VeryGood, "85-89"),
    (2.5, Remark::Good, "80-84"),
    (2.0, Remark::Average, "75-79"),
];

const FAIL_BAND: (Remark, &str) = (Remark::Fail, "<75");

/// 按 GWA 查找评语和档位
pub fn classify(average: f64) -> (Remark, &'static str) {
    BANDS
        .iter()
        .find(|(lower, _, _)| average >= *lower)
        .map(|(_, remark, scale)| (*remark, *scale))
        .unwrap_or(FAIL_BAND)
}

/// 汇总记录
pub fn aggregate(records: &[GradeRecord]) -> AggregationResult {
    let total_weighted: f64 = records.iter().map(GradeRecord::weighted).sum();
    let total_units: f64 = records.iter().map(|r| r.units).sum();

    let average = if total_units > 0.0 {
        total_weighted / total_units
    } else {
        0.0
    };
    let (remark, scale) = classify(average);

    AggregationResult {
        average,
        total_units,
        total_subjects: records.len(),
        total_weighted,
        remark,
        scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(code: &str, title: &str, grade: f64, units: f64) -> GradeRecord {
        GradeRecord::new(code, title, grade, units)
    }

    #[test]
    fn test_empty_input_is_degenerate() {
        let result = aggregate(&[]);
        assert_eq!(result.average, 0.0);
        assert_eq!(result.total_units, 0.0);
        assert_eq!(result.total_subjects, 0);
        assert_eq!(result.total_weighted, 0.0);
        assert_eq!(result.remark, Remark::Fail);
        assert!(result.is_degenerate());
        assert_eq!(result.average_text(), "0.00");
    }

    #[test]
    fn test_weighted_average() {
        let result = aggregate(&[
            rec("CS101", "Intro", 1.5, 3.0),
            rec("CS102", "Data", 2.0, 3.0),
        ]);
        assert_eq!(result.average_text(), "1.75");
        assert_eq!(result.total_units, 6.0);
        assert_eq!(result.total_subjects, 2);
        assert_eq!(result.total_weighted_text(), "10.50");
        assert_eq!(result.remark, Remark::Fail);
        assert_eq!(result.scale, "<75");
    }

    #[test]
    fn test_units_weight_the_average() {
        let result = aggregate(&[
            rec("A", "a", 4.0, 5.0),
            rec("B", "b", 2.0, 1.0),
        ]);
        // (20 + 2) / 6
        assert!((result.average - 22.0 / 6.0).abs() < 1e-12);
        assert_eq!(result.average_text(), "3.67");
        assert_eq!(result.remark, Remark::Distinction);
    }

    #[test]
    fn test_band_boundaries_are_inclusive() {
        assert_eq!(classify(4.0), (Remark::HighDistinction, "96-100"));
        assert_eq!(classify(3.99), (Remark::Distinction, "90-95"));
        assert_eq!(classify(3.5), (Remark::Distinction, "90-95"));
        assert_eq!(classify(3.0), (Remark::VeryGood, "85-89"));
        assert_eq!(classify(2.5), (Remark::Good, "80-84"));
        assert_eq!(classify(2.0), (Remark::Average, "75-79"));
        assert_eq!(classify(1.99), (Remark::Fail, "<75"));
        assert_eq!(classify(0.0), (Remark::Fail, "<75"));
        assert_eq!(classify(5.0), (Remark::HighDistinction, "96-100"));
    }

    #[test]
    fn test_classification_is_monotonic() {
        let mut previous = classify(0.0).0;
        for step in 0..=500 {
            let average = f64::from(step) / 100.0;
            let (remark, _) = classify(average);
            assert!(remark >= previous, "{} 的档位低于更小的平均值", average);
            previous = remark;
        }
    }

    #[test]
    fn test_remark_display_includes_letter() {
        assert_eq!(Remark::HighDistinction.to_string(), "High Distinction (A)");
        assert_eq!(Remark::Fail.to_string(), "Fail (F)");
        assert_eq!(Remark::VeryGood.label(), "Very Good");
    }
}
