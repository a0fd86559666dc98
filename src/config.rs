use crate::error::ConfigError;
use crate::models::CategorySet;
use crate::services::table_locator::DEFAULT_TABLE_SELECTOR;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// SPR 所在站点，活动页面的 URL 必须包含它
    pub target_host: String,
    /// 设置后启动无头浏览器并导航到此 URL
    pub target_url: Option<String>,
    /// 设置后从本地 HTML 文件读取，不连接浏览器
    pub html_file: Option<String>,
    /// 候选表格的 CSS 选择器
    pub table_selector: String,
    /// 设置文件路径
    pub settings_file: String,
    /// 逗号分隔的排除类别，设置后覆盖设置文件中的开关
    pub exclude: Option<String>,
    /// 提取完成后在页面上高亮疑似成绩的单元格（调试用）
    pub highlight_grades: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出报告文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_debug_port: 9222,
            target_host: "umindanao.edu.ph".to_string(),
            target_url: None,
            html_file: None,
            table_selector: DEFAULT_TABLE_SELECTOR.to_string(),
            settings_file: "settings.toml".to_string(),
            exclude: None,
            highlight_grades: false,
            verbose_logging: false,
            output_log_file: "gwa_report.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取配置，缺失或无法解析的值使用默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            browser_debug_port: lookup("BROWSER_DEBUG_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.browser_debug_port),
            target_host: non_empty("TARGET_HOST").unwrap_or(default.target_host),
            target_url: non_empty("TARGET_URL"),
            html_file: non_empty("SPR_HTML_FILE"),
            table_selector: non_empty("TABLE_SELECTOR").unwrap_or(default.table_selector),
            settings_file: non_empty("SETTINGS_FILE").unwrap_or(default.settings_file),
            exclude: lookup("EXCLUDE"),
            highlight_grades: lookup("HIGHLIGHT_GRADES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.highlight_grades),
            verbose_logging: lookup("VERBOSE_LOGGING")
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
            output_log_file: non_empty("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 解析 `EXCLUDE` 覆盖项
    pub fn exclusion_override(&self) -> Result<Option<CategorySet>, ConfigError> {
        match &self.exclude {
            None => Ok(None),
            Some(list) => CategorySet::parse_list(list)
                .map(Some)
                .map_err(|name| ConfigError::UnknownCategory { name }),
        }
    }
}
