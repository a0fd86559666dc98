//! 行提取 - 业务能力层
//!
//! 自上而下扫描表体行，每行交给记录校验

use crate::error::ConfigError;
use crate::models::GradeRecord;
use crate::services::table_locator::parse_selector;
use crate::services::validator;
use scraper::{ElementRef, Selector};
use tracing::debug;

/// 非数据行的标记 class
pub const MARKER_ROW_CLASS: &str = "tr-primary-marker";

/// 一行至少需要的单元格数：代码、标题、成绩、学分
pub const MIN_CELLS: usize = 4;

/// 单次扫描的行统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RowStats {
    pub rows: usize,
    pub markers: usize,
    pub short: usize,
    pub rejected: usize,
    pub accepted: usize,
}

/// 行提取器
pub struct RowExtractor {
    row: Selector,
    cell: Selector,
}

impl RowExtractor {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            row: parse_selector("tbody tr")?,
            cell: parse_selector("td")?,
        })
    }

    /// 提取表格中的合法记录，保持源顺序
    pub fn extract(&self, table: ElementRef<'_>) -> Vec<GradeRecord> {
        self.extract_with_stats(table).0
    }

    /// 同 [`extract`](Self::extract)，并返回跳过原因的统计
    pub fn extract_with_stats(&self, table: ElementRef<'_>) -> (Vec<GradeRecord>, RowStats) {
        let mut stats = RowStats::default();
        let mut records = Vec::new();

        for row in table.select(&self.row) {
            stats.rows += 1;

            if is_marker_row(&row) {
                stats.markers += 1;
                continue;
            }

            let cells: Vec<String> = row
                .select(&self.cell)
                .take(MIN_CELLS)
                .map(cell_text)
                .collect();
            if cells.len() < MIN_CELLS {
                stats.short += 1;
                continue;
            }

            match validator::validate(&cells[0], &cells[1], &cells[2], &cells[3]) {
                Some(record) => {
                    debug!("有效行: {}", record);
                    stats.accepted += 1;
                    records.push(record);
                }
                None => {
                    debug!("跳过无法解析的行: {:?}", cells);
                    stats.rejected += 1;
                }
            }
        }

        debug!(
            "行扫描完成: 共 {} 行, 标记行 {}, 单元格不足 {}, 校验失败 {}, 有效 {}",
            stats.rows, stats.markers, stats.short, stats.rejected, stats.accepted
        );
        (records, stats)
    }
}

fn is_marker_row(row: &ElementRef<'_>) -> bool {
    row.value().classes().any(|c| c == MARKER_ROW_CLASS)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::table_locator::{TableLocator, DEFAULT_TABLE_SELECTOR};
    use scraper::Html;

    fn extract(html: &str) -> (Vec<GradeRecord>, RowStats) {
        let doc = Html::parse_document(html);
        let table = TableLocator::new(DEFAULT_TABLE_SELECTOR).unwrap().locate(&doc).unwrap();
        RowExtractor::new().unwrap().extract_with_stats(table)
    }

    #[test]
    fn test_extracts_rows_in_order() {
        let (records, stats) = extract(
            r#"<table class="table">
                 <thead><tr><th>Code</th><th>Title</th><th>Grade</th><th>Units</th></tr></thead>
                 <tbody>
                   <tr><td>CS101</td><td>Intro</td><td>1.5</td><td>3</td></tr>
                   <tr><td>CS102</td><td>Data</td><td>2.0</td><td>3</td></tr>
                 </tbody>
               </table>"#,
        );
        assert_eq!(
            records,
            vec![
                GradeRecord::new("CS101", "Intro", 1.5, 3.0),
                GradeRecord::new("CS102", "Data", 2.0, 3.0),
            ]
        );
        assert_eq!(stats.accepted, 2);
    }

    #[test]
    fn test_skips_marker_short_and_invalid_rows() {
        let (records, stats) = extract(
            r#"<table class="table">
                 <thead><tr><th>Code</th></tr></thead>
                 <tbody>
                   <tr class="tr-primary-marker"><td>1ST</td><td>SEMESTER</td><td>2.0</td><td>3</td></tr>
                   <tr><td colspan="4">School Year 2023-2024</td></tr>
                   <tr><td>CS101</td><td>Intro</td><td>INC</td><td>3</td></tr>
                   <tr><td>CS102</td><td>Data</td><td>3.25</td><td>3</td><td>Passed</td></tr>
                 </tbody>
               </table>"#,
        );
        assert_eq!(records, vec![GradeRecord::new("CS102", "Data", 3.25, 3.0)]);
        assert_eq!(
            stats,
            RowStats {
                rows: 4,
                markers: 1,
                short: 1,
                rejected: 1,
                accepted: 1,
            }
        );
    }

    #[test]
    fn test_cell_text_includes_nested_markup() {
        let (records, _) = extract(
            r#"<table class="table"><thead><tr><th>x</th></tr></thead><tbody>
                 <tr><td> <b>IT 200</b> </td><td><span>Systems</span> Design</td><td>4.0</td><td>3.0</td></tr>
               </tbody></table>"#,
        );
        assert_eq!(records[0].subject_code, "IT 200");
        assert_eq!(records[0].title, "Systems Design");
    }

    #[test]
    fn test_header_rows_outside_tbody_are_not_scanned() {
        let (records, stats) = extract(
            r#"<table class="table">
                 <thead><tr><td>CS000</td><td>Header</td><td>1.0</td><td>1</td></tr></thead>
                 <tbody></tbody>
               </table>"#,
        );
        assert!(records.is_empty());
        assert_eq!(stats.rows, 0);
    }
}
