use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 提取流程错误（面向用户的提示）
    #[error(transparent)]
    Extract(#[from] ExtractError),
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 设置文件错误
    #[error("设置错误: {0}")]
    Settings(#[from] SettingsError),
}

/// 提取流程错误
///
/// 每一种情况都对应一条用户可见的单行提示，不是通用失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// 没有可以提取的目标页面
    #[error("No active tab found")]
    NoActiveDocument,
    /// 目标页面不是 SPR 所在站点
    #[error("Please navigate to your UM SPR webpage first.")]
    WrongSite { url: String },
    /// 页面上没有候选表格
    #[error("No grades table found on this page. Make sure you are on your SPR page.")]
    NoTableFound,
    /// 所有行都未通过校验
    #[error("No grades found on this page. Make sure you are on your SPR page.")]
    NoValidRecords,
    /// 有提取结果，但过滤后总学分为 0
    #[error("No completed subjects found to compute GWA.")]
    EmptyAfterAggregation,
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: BoxError,
    },
    /// 获取页面列表失败
    #[error("获取页面列表失败: {source}")]
    PageListFailed {
        #[source]
        source: BoxError,
    },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed {
        #[source]
        source: BoxError,
    },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: BoxError,
    },
    /// 读取页面内容失败
    #[error("读取页面内容失败: {source}")]
    ContentFailed {
        #[source]
        source: BoxError,
    },
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptExecutionFailed {
        #[source]
        source: BoxError,
    },
    /// 浏览器配置失败
    #[error("浏览器配置失败: {message}")]
    ConfigurationFailed { message: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 未知的排除类别
    #[error("未知的排除类别: {name}")]
    UnknownCategory { name: String },
    /// 表格选择器无效
    #[error("表格选择器无效: {selector}")]
    InvalidSelector { selector: String },
    /// 读取离线 HTML 文件失败
    #[error("读取 HTML 文件失败 ({path}): {source}")]
    HtmlFileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 设置文件错误
#[derive(Debug, Error)]
pub enum SettingsError {
    /// 读取失败
    #[error("读取设置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入失败
    #[error("写入设置文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// TOML 序列化失败
    #[error("TOML序列化失败: {0}")]
    TomlSerializeFailed(#[from] toml::ser::Error),
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::ScriptExecutionFailed {
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Browser(BrowserError::ScriptExecutionFailed {
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl BrowserError {
    /// 创建浏览器连接错误
    pub fn connection_failed(
        port: u16,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        BrowserError::ConnectionFailed {
            port,
            source: Box::new(source),
        }
    }

    /// 创建导航错误
    pub fn navigation_failed(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        BrowserError::NavigationFailed {
            url: url.into(),
            source: Box::new(source),
        }
    }
}

impl AppError {
    /// 若为提取流程错误则返回它
    pub fn as_extract(&self) -> Option<&ExtractError> {
        match self {
            AppError::Extract(e) => Some(e),
            _ => None,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
