use crate::error::{BrowserError, ExtractError};
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// 连接到正在运行的浏览器
///
/// 浏览器需以 `--remote-debugging-port=<port>` 启动
pub async fn connect_to_browser(port: u16) -> Result<Browser, BrowserError> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        BrowserError::connection_failed(port, e)
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    Ok(browser)
}

/// 查找活动页面
///
/// 优先返回 URL 包含目标站点的页面，否则返回第一个页面；
/// 浏览器中没有任何页面时返回 [`ExtractError::NoActiveDocument`]
pub async fn find_active_page(
    browser: &Browser,
    target_host: &str,
) -> Result<Page, crate::error::AppError> {
    let pages = browser
        .pages()
        .await
        .map_err(|e| BrowserError::PageListFailed {
            source: Box::new(e),
        })?;
    debug!("获取到 {} 个页面", pages.len());

    let mut first = None;
    for page in pages {
        let url = page.url().await.ok().flatten().unwrap_or_default();
        debug!("检查页面: {}", url);
        if url.contains(target_host) {
            info!("✓ 找到目标页面: {}", url);
            return Ok(page);
        }
        if first.is_none() && !url.is_empty() {
            first = Some(page);
        }
    }

    first.ok_or_else(|| ExtractError::NoActiveDocument.into())
}

/// 连接浏览器并获取活动页面
pub async fn connect_to_browser_and_page(
    port: u16,
    target_host: &str,
) -> Result<(Browser, Page), crate::error::AppError> {
    let browser = connect_to_browser(port).await?;
    let page = find_active_page(&browser, target_host).await?;
    Ok((browser, page))
}
