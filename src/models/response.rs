//! 通用 API 响应模型
//!
//! 定义统一的 API 响应格式，以及区分实时数据与兜底数据的 `Feed`

use serde::{Deserialize, Serialize};
use chrono::Utc;
use chrono_tz::Asia::Shanghai;

/// 获取北京时间（UTC+8）
pub fn get_beijing_time() -> chrono::DateTime<chrono_tz::Tz> {
    Utc::now().with_timezone(&Shanghai)
}

/// 统一 API 响应结构
///
/// 所有接口返回统一格式，包含：
/// - success: 请求是否成功
/// - data: 响应数据（成功时有值）
/// - message: 响应消息
/// - timestamp: 响应时间戳（北京时间）
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// 请求是否成功
    pub success: bool,
    /// 响应数据
    pub data: Option<T>,
    /// 响应消息
    pub message: String,
    /// 响应时间戳（ISO 8601 格式）
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: "Success".to_string(),
            timestamp: get_beijing_time().to_rfc3339(),
        }
    }

    /// 创建错误响应
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message,
            timestamp: get_beijing_time().to_rfc3339(),
        }
    }
}

/// 带来源标记的数据
///
/// 上游接口失败时服务层返回 `Fallback`，前端据 `source` 字段区分
/// 实时数据与占位数据，而不是把两者当作同一种 JSON。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Feed<T> {
    /// 实时数据
    Live { data: T },
    /// 兜底数据及失败原因
    Fallback { data: T, reason: String },
}

impl<T> Feed<T> {
    pub fn live(data: T) -> Self {
        Feed::Live { data }
    }

    pub fn fallback(data: T, reason: impl Into<String>) -> Self {
        Feed::Fallback {
            data,
            reason: reason.into(),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Feed::Live { .. })
    }

    pub fn data(&self) -> &T {
        match self {
            Feed::Live { data } | Feed::Fallback { data, .. } => data,
        }
    }

    pub fn into_data(self) -> T {
        match self {
            Feed::Live { data } | Feed::Fallback { data, .. } => data,
        }
    }

    /// 兜底原因，实时数据为 `None`
    pub fn reason(&self) -> Option<&str> {
        match self {
            Feed::Live { .. } => None,
            Feed::Fallback { reason, .. } => Some(reason),
        }
    }
}
