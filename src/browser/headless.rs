use crate::error::BrowserError;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

/// 启动无头浏览器并导航到指定 URL
///
/// 用于已保存登录状态或无需登录即可访问的 SPR 页面
pub async fn launch_headless_browser(url: &str) -> Result<(Browser, Page), BrowserError> {
    info!("🚀 启动无头浏览器...");
    debug!("目标 URL: {}", url);

    let config = BrowserConfig::builder()
        .new_headless_mode()
        .args(vec![
            "--disable-gpu",
            "--no-sandbox",
            "--disable-dev-shm-usage",
        ])
        .build()
        .map_err(|message| {
            error!("配置无头浏览器失败: {}", message);
            BrowserError::ConfigurationFailed { message }
        })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        BrowserError::PageCreationFailed {
            source: Box::new(e),
        }
    })?;
    debug!("无头浏览器启动成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page(url).await.map_err(|e| {
        error!("导航到 {} 失败: {}", url, e);
        BrowserError::navigation_failed(url, e)
    })?;
    page.wait_for_navigation()
        .await
        .map_err(|e| BrowserError::navigation_failed(url, e))?;

    info!("✅ 无头浏览器已导航到: {}", url);
    Ok((browser, page))
}
