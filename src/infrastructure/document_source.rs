//! 文档来源 - 基础设施层
//!
//! 浏览器中的活动页面，或本地保存的 HTML 文件

use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{AppResult, ConfigError};
use crate::infrastructure::PageHandle;
use crate::models::DocumentSnapshot;

/// 文档来源
pub enum DocumentSource {
    /// 浏览器页面
    Page(PageHandle),
    /// 离线 HTML 文件
    File(PathBuf),
}

impl DocumentSource {
    /// 提取结果中使用的来源标识
    pub fn source_name(&self) -> &'static str {
        match self {
            DocumentSource::Page(_) => "content-script",
            DocumentSource::File(_) => "file",
        }
    }

    /// 页面句柄，离线文件模式下为 `None`
    pub fn page(&self) -> Option<&PageHandle> {
        match self {
            DocumentSource::Page(handle) => Some(handle),
            DocumentSource::File(_) => None,
        }
    }

    /// 获取文档快照
    pub async fn snapshot(&self) -> AppResult<DocumentSnapshot> {
        match self {
            DocumentSource::Page(handle) => handle.snapshot().await,
            DocumentSource::File(path) => {
                info!("📄 读取本地 HTML 文件: {}", path.display());
                let html = tokio::fs::read_to_string(path).await.map_err(|source| {
                    ConfigError::HtmlFileReadFailed {
                        path: path.display().to_string(),
                        source,
                    }
                })?;
                debug!("读取 {} 字节", html.len());
                let url = format!("file://{}", path.display());
                Ok(DocumentSnapshot::new(url, html))
            }
        }
    }
}
