//! 页面句柄 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"读取快照"和"执行 JS"的能力

use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{AppResult, BrowserError};
use crate::models::DocumentSnapshot;

/// 在页面上高亮疑似成绩的单元格，返回高亮数量
///
/// 只修改样式，不改变文档结构
const HIGHLIGHT_GRADES_JS: &str = r#"
(() => {
  let count = 0;
  for (const cell of document.querySelectorAll('table td')) {
    const value = parseFloat((cell.textContent || '').trim());
    if (!isNaN(value) && value >= 1.0 && value <= 5.0) {
      cell.style.backgroundColor = 'rgba(102, 126, 234, 0.1)';
      cell.style.border = '1px solid rgba(102, 126, 234, 0.3)';
      count += 1;
    }
  }
  return count;
})()
"#;

/// 页面句柄
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 读取 URL 与 HTML 快照
/// - 暴露 eval() 能力
/// - 不认识成绩记录，不处理业务流程
pub struct PageHandle {
    page: Page,
}

impl PageHandle {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 读取当前页面的 URL 与 HTML
    pub async fn snapshot(&self) -> AppResult<DocumentSnapshot> {
        let url = self
            .page
            .url()
            .await
            .map_err(|e| BrowserError::ContentFailed {
                source: Box::new(e),
            })?
            .unwrap_or_default();

        let html = self
            .page
            .content()
            .await
            .map_err(|e| BrowserError::ContentFailed {
                source: Box::new(e),
            })?;

        debug!("页面快照: {} ({} 字节)", url, html.len());
        Ok(DocumentSnapshot { url, html })
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> AppResult<JsonValue> {
        let result = self.page.evaluate(js_code.into()).await?;
        let json_value = result.into_value()?;
        Ok(json_value)
    }

    /// 执行 JS 代码并反序列化为指定类型
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> AppResult<T> {
        let json_value = self.eval(js_code).await?;
        let typed_value = serde_json::from_value(json_value)?;
        Ok(typed_value)
    }

    /// 高亮疑似成绩的单元格（调试用）
    ///
    /// 不属于提取流程，只能在提取完成之后调用
    pub async fn highlight_grades(&self) -> AppResult<usize> {
        self.eval_as::<usize>(HIGHLIGHT_GRADES_JS).await
    }
}
