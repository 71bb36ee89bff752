use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 任务状态
///
/// 只允许 pending → completed，没有反向转换。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    /// 状态徽章文字
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Completed => "Completed",
        }
    }

    /// 返回状态对应的图标
    pub fn icon(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "○",
            TaskStatus::Completed => "✓",
        }
    }

    /// 线上格式 ("pending" / "completed")
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }
}

/// 任务数据（由 TaskService 分配 id）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// 服务端分配的唯一 ID，客户端从不修改
    pub id: String,
    /// 任务标题，创建后不可修改
    pub title: String,
    /// 任务状态
    #[serde(default)]
    pub status: TaskStatus,
    /// 创建时间（旧服务端可能不返回）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    /// 是否还可以标记为完成
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::Pending
    }
}

/// `POST /tasks` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
}

/// `PUT /tasks/{id}` 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: TaskStatus,
}

/// 格式化任务年龄，如 "5m ago"、"3h ago"
pub fn format_age(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(created_at) = created_at else {
        return String::new();
    };

    let seconds = now.signed_duration_since(created_at).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 365 {
        format!("{}d ago", days)
    } else {
        format!("{}y ago", days / 365)
    }
}
