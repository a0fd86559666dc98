//! API 模块
//!
//! 负责与宿主界面之间的请求/响应消息

pub mod messages;

// 重新导出常用类型
pub use messages::{
    calculate_gwa, Ack, GradesPayload, GwaSummary, MessageHandler, Request, Response,
    SettingsPayload,
};
