//! 统一错误类型定义
//!
//! 使用 `thiserror` 库提供统一的错误处理，支持错误链式传播。
//! 面向用户的提示只区分三种失败（见 [`FailureKind`]），详细信息写入日志。

use std::io;
use thiserror::Error;

/// task-tracker 错误类型
#[derive(Debug, Error)]
pub enum TrackerError {
    /// I/O 错误（配置文件、日志文件读写等）
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(String),

    /// TOML 解析错误
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML 序列化错误
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// 传输层错误（连接失败、响应体解码失败等）
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TaskService 返回了非 2xx 状态码
    #[error("API error ({status}): {detail}")]
    Api { status: u16, detail: String },

    /// 后台请求任务异常退出（panic）
    #[error("Background task failed: {0}")]
    Background(String),

    /// Backend URL 无法解析
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// task-tracker Result 类型别名
pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    /// 创建 Config 错误
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// 创建 Api 错误
    pub fn api(status: u16, detail: impl Into<String>) -> Self {
        Self::Api {
            status,
            detail: detail.into(),
        }
    }
}

/// 面向用户的失败类型
///
/// 所有错误最终折叠成这三种之一，界面上只显示固定文案。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// 加载列表失败
    Load,
    /// 创建任务失败
    Create,
    /// 更新任务状态失败
    Update,
}

impl FailureKind {
    /// 显示给用户的提示文案
    pub fn message(&self) -> &'static str {
        match self {
            FailureKind::Load => "Failed to load tasks",
            FailureKind::Create => "Failed to add task",
            FailureKind::Update => "Failed to update task",
        }
    }

    /// 写入日志时使用的描述
    pub fn log_context(&self) -> &'static str {
        match self {
            FailureKind::Load => "Error fetching tasks",
            FailureKind::Create => "Error adding task",
            FailureKind::Update => "Error updating task",
        }
    }
}
