//! 跨上下文消息
//!
//! 一次请求对应一次响应，不做流式、重试或超时。
//! 请求通过 `action` 字段区分：
//!
//! ```json
//! { "action": "extractGrades", "excludePE": true, "excludeNSTP": false }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AppError, ExtractError};
use crate::infrastructure::DocumentSource;
use crate::models::{CategorySet, ExtractionResult, GradeRecord, Settings, SettingsStore};
use crate::services;
use crate::workflow::{counted_records, ExtractionFlow};

/// 请求
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action")]
pub enum Request {
    /// 从当前文档提取成绩
    #[serde(rename = "extractGrades")]
    ExtractGrades {
        #[serde(default, rename = "excludePE")]
        exclude_pe: bool,
        #[serde(default, rename = "excludeNSTP")]
        exclude_nstp: bool,
    },
    /// 对给定成绩计算 GWA
    #[serde(rename = "calculateGWA")]
    CalculateGwa {
        #[serde(default)]
        data: Option<GradesPayload>,
    },
    /// 读取设置
    #[serde(rename = "getSettings")]
    GetSettings,
    /// 保存设置
    #[serde(rename = "saveSettings")]
    SaveSettings { settings: SettingsPayload },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GradesPayload {
    #[serde(default)]
    pub grades: Vec<GradeRecord>,
}

/// 消息中的设置格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettingsPayload {
    #[serde(default, rename = "excludePE")]
    pub exclude_pe: bool,
    #[serde(default, rename = "excludeNSTP")]
    pub exclude_nstp: bool,
}

impl From<&Settings> for SettingsPayload {
    fn from(settings: &Settings) -> Self {
        Self {
            exclude_pe: settings.exclude_pe,
            exclude_nstp: settings.exclude_nstp,
        }
    }
}

/// GWA 计算结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GwaSummary {
    /// 两位小数
    pub gwa: String,
    pub remark: String,
    pub scale: String,
    pub total_units: f64,
    pub total_subjects: usize,
    /// 两位小数
    pub total_weighted: String,
    pub calculated_at: DateTime<Utc>,
}

/// 通用应答
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<GwaSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Ack {
    fn ok() -> Self {
        Self {
            success: true,
            data: None,
            settings: None,
            error: None,
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            settings: None,
            error: Some(message.into()),
        }
    }
}

/// 响应
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// `extractGrades` 的结果
    Grades(ExtractionResult),
    /// 其他请求的应答
    Ack(Ack),
}

/// 消息处理器
///
/// 职责：
/// - 把请求分发到提取流程、汇总或设置存储
/// - 每个请求独立处理，不保留状态
pub struct MessageHandler<'a> {
    flow: &'a ExtractionFlow,
    document: Option<&'a DocumentSource>,
    store: &'a SettingsStore,
}

impl<'a> MessageHandler<'a> {
    pub fn new(
        flow: &'a ExtractionFlow,
        document: Option<&'a DocumentSource>,
        store: &'a SettingsStore,
    ) -> Self {
        Self {
            flow,
            document,
            store,
        }
    }

    /// 处理一条请求
    pub async fn handle(&self, request: Request) -> Response {
        debug!("收到请求: {:?}", request);
        match request {
            Request::ExtractGrades {
                exclude_pe,
                exclude_nstp,
            } => match self
                .extract_grades(CategorySet::from_flags(exclude_pe, exclude_nstp))
                .await
            {
                Ok(result) => Response::Grades(result),
                Err(e) => {
                    warn!("提取失败: {}", e);
                    Response::Ack(Ack::failed(e.to_string()))
                }
            },
            Request::CalculateGwa { data } => Response::Ack(calculate_gwa(data)),
            Request::GetSettings => Response::Ack(self.get_settings().await),
            Request::SaveSettings { settings } => Response::Ack(self.save_settings(settings).await),
        }
    }

    /// 处理一行 JSON 请求，返回一行 JSON 响应
    pub async fn handle_json(&self, line: &str) -> String {
        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request).await,
            Err(e) => Response::Ack(Ack::failed(format!("Invalid request: {}", e))),
        };
        serde_json::to_string(&response).unwrap_or_else(|e| error_json(&e.to_string()))
    }

    /// 提取并过滤成绩；没有表格时返回空列表
    async fn extract_grades(&self, categories: CategorySet) -> Result<ExtractionResult, AppError> {
        let document = self.document.ok_or(ExtractError::NoActiveDocument)?;
        let snapshot = document.snapshot().await?;
        let mut result = self.flow.extract_lenient(&snapshot);
        result.source = document.source_name().to_string();
        result.grades = counted_records(result.grades, &categories);
        Ok(result)
    }

    async fn get_settings(&self) -> Ack {
        match self.store.load().await {
            Ok(settings) => Ack {
                settings: Some(settings.as_ref().map(SettingsPayload::from).unwrap_or_default()),
                ..Ack::ok()
            },
            Err(e) => Ack::failed(e.to_string()),
        }
    }

    async fn save_settings(&self, payload: SettingsPayload) -> Ack {
        let settings = Settings {
            exclude_pe: payload.exclude_pe,
            exclude_nstp: payload.exclude_nstp,
            ..Default::default()
        };
        match self.store.save(&settings).await {
            Ok(()) => Ack::ok(),
            Err(e) => Ack::failed(e.to_string()),
        }
    }
}

/// 序列化失败时的应答，错误文本经过 JSON 转义
fn error_json(message: &str) -> String {
    serde_json::json!({ "success": false, "error": message }).to_string()
}

/// 对请求中给定的成绩计算 GWA
///
/// 成绩或学分为 0 的记录不计入
pub fn calculate_gwa(data: Option<GradesPayload>) -> Ack {
    let grades = data.map(|d| d.grades).unwrap_or_default();
    if grades.is_empty() {
        return Ack::failed("No grades provided");
    }

    let counted = services::drop_in_progress(grades);
    let result = services::aggregate(&counted);
    Ack {
        data: Some(GwaSummary {
            gwa: result.average_text(),
            remark: result.remark.to_string(),
            scale: result.scale.to_string(),
            total_units: result.total_units,
            total_subjects: result.total_subjects,
            total_weighted: result.total_weighted_text(),
            calculated_at: Utc::now(),
        }),
        ..Ack::ok()
    }
}
