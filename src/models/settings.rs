use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::CategorySet;

/// 用户设置
///
/// 保存在 TOML 文件中，与安装时写入的元数据放在一起
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// 排除体育课
    #[serde(default)]
    pub exclude_pe: bool,
    /// 排除 NSTP
    #[serde(default)]
    pub exclude_nstp: bool,
    /// 首次创建设置文件时的程序版本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// 首次创建设置文件的时间
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_date: Option<DateTime<Utc>>,
}

impl Settings {
    /// 安装时的默认设置
    pub fn installed_now() -> Self {
        Self {
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
            install_date: Some(Utc::now()),
            ..Default::default()
        }
    }

    pub fn categories(&self) -> CategorySet {
        CategorySet::from_flags(self.exclude_pe, self.exclude_nstp)
    }
}
