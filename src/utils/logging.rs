use anyhow::Result;
/// 日志工具模块
///
/// 提供启动信息、结果报告的格式化和输出
use std::fs;
use tracing::info;

use crate::config::Config;
use crate::models::CategorySet;
use crate::workflow::GwaReport;

/// 初始化报告文件
///
/// # 参数
/// - `log_file_path`: 报告文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\nGWA 报告 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 追加内容到报告文件
pub fn append_log_file(log_file_path: &str, content: &str) -> Result<()> {
    use std::io::Write;
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - SPR GWA 计算");
    match (&config.html_file, &config.target_url) {
        (Some(file), _) => info!("📄 离线模式: {}", file),
        (None, Some(url)) => info!("🌐 无头浏览器: {}", url),
        (None, None) => info!("🔌 浏览器调试端口: {}", config.browser_debug_port),
    }
    info!("{}", "=".repeat(60));
}

/// 记录生效的排除类别
pub fn log_categories(categories: &CategorySet) {
    if categories.is_empty() {
        info!("📋 不排除任何类别");
    } else {
        info!("📋 排除类别: {}", categories);
    }
}

/// 把报告渲染为文本
///
/// 标题过长时截断
pub fn render_report(report: &GwaReport) -> String {
    let agg = &report.aggregation;
    let mut out = String::new();

    out.push_str(&format!("GWA: {}\n", agg.average_text()));
    out.push_str(&format!("Remark: {}\n", agg.remark));
    out.push_str(&format!("Scale: {}\n", agg.scale));
    out.push_str(&format!("Total units: {}\n", agg.total_units));
    out.push_str(&format!("Total subjects: {}\n", agg.total_subjects));
    out.push_str(&format!("Total weighted: {}\n", agg.total_weighted_text()));
    out.push_str(&format!("Excluded: {}\n", report.categories));
    out.push_str(&format!("Source: {} ({})\n", report.extraction.url, report.extraction.source));
    out.push_str(&format!("{}\n", "─".repeat(60)));
    out.push_str(&format!("{:<12} {:<32} {:>6} {:>6}\n", "Subject", "Title", "Grade", "Units"));

    for record in &report.counted {
        out.push_str(&format!(
            "{:<12} {:<32} {:>6.2} {:>6}\n",
            record.subject_code,
            truncate_text(&record.title, 30),
            record.grade,
            record.units
        ));
    }
    out
}

/// 打印最终报告
pub fn print_report(report: &GwaReport, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 计算完成");
    info!("{}", "=".repeat(60));
    for line in render_report(report).lines() {
        info!("{}", line);
    }
    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
