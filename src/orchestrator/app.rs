//! 应用编排 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：读取配置、解析文档来源（浏览器页面或本地文件）
//! 2. **单次运行**：设置 → 排除类别 → 快照 → 站点检查 → 提取流程 → 报告
//! 3. **消息模式**：逐行读取 JSON 请求，逐行写出 JSON 响应
//!
//! 每次运行都是独立的，不缓存任何页面状态

use anyhow::{Context, Result};
use chromiumoxide::Browser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::api::MessageHandler;
use crate::browser;
use crate::config::Config;
use crate::error::AppError;
use crate::infrastructure::{DocumentSource, PageHandle};
use crate::models::{CategorySet, SettingsStore};
use crate::utils::logging::{
    append_log_file, init_log_file, log_categories, log_startup, print_report, render_report,
};
use crate::workflow::{ensure_target_site, ExtractionFlow, GwaReport};

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Option<Browser>,
    document: DocumentSource,
    flow: ExtractionFlow,
    store: SettingsStore,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let (browser, document) = resolve_document(&config).await?;
        let flow = ExtractionFlow::from_config(&config)?.with_source(document.source_name());
        let store = SettingsStore::new(&config.settings_file);

        Ok(Self {
            config,
            _browser: browser,
            document,
            flow,
            store,
        })
    }

    /// 使用已有的文档来源创建（不连接浏览器）
    pub fn with_document(config: Config, document: DocumentSource) -> Result<Self> {
        let flow = ExtractionFlow::from_config(&config)?.with_source(document.source_name());
        let store = SettingsStore::new(&config.settings_file);
        Ok(Self {
            config,
            _browser: None,
            document,
            flow,
            store,
        })
    }

    /// 运行一次完整的提取和计算
    pub async fn run(&self) -> Result<GwaReport> {
        let categories = self.resolve_categories().await?;
        log_categories(&categories);

        let snapshot = self.document.snapshot().await?;
        if self.document.page().is_some() {
            ensure_target_site(&snapshot.url, &self.config.target_host).map_err(AppError::from)?;
        }

        let report = self.flow.run(&snapshot, categories).map_err(AppError::from)?;

        // 调试高亮只在提取完成之后运行
        if self.config.highlight_grades {
            if let Some(page) = self.document.page() {
                match page.highlight_grades().await {
                    Ok(count) => info!("🖍 已高亮 {} 个单元格", count),
                    Err(e) => warn!("高亮失败: {}", e),
                }
            }
        }

        self.write_report(&report)?;
        print_report(&report, &self.config.output_log_file);

        Ok(report)
    }

    /// 消息模式：从 stdin 逐行读取请求，向 stdout 逐行写出响应
    pub async fn serve_messages(&self) -> Result<()> {
        info!("📨 消息模式已启动，等待请求...");
        let handler = MessageHandler::new(&self.flow, Some(&self.document), &self.store);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let response = handler.handle_json(&line).await;
            stdout.write_all(response.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }

        info!("stdin 已关闭，消息模式结束");
        Ok(())
    }

    /// 生效的排除类别：`EXCLUDE` 覆盖设置文件
    async fn resolve_categories(&self) -> Result<CategorySet> {
        if let Some(categories) = self.config.exclusion_override()? {
            return Ok(categories);
        }
        debug!("读取设置文件: {}", self.store.path().display());
        let settings = self.store.load_or_install().await?;
        Ok(settings.categories())
    }

    fn write_report(&self, report: &GwaReport) -> Result<()> {
        let path = &self.config.output_log_file;
        init_log_file(path).with_context(|| format!("无法写入报告文件: {}", path))?;
        append_log_file(path, &render_report(report))
            .with_context(|| format!("无法写入报告文件: {}", path))?;
        Ok(())
    }
}

/// 按配置解析文档来源
///
/// 优先级：本地文件 > 无头浏览器 > 连接已运行的浏览器
async fn resolve_document(config: &Config) -> Result<(Option<Browser>, DocumentSource)> {
    if let Some(file) = &config.html_file {
        return Ok((None, DocumentSource::File(file.into())));
    }

    let (browser, page) = match &config.target_url {
        Some(url) => browser::launch_headless_browser(url).await?,
        None => {
            browser::connect_to_browser_and_page(config.browser_debug_port, &config.target_host)
                .await?
        }
    };

    Ok((Some(browser), DocumentSource::Page(PageHandle::new(page))))
}
