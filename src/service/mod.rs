//! TaskService 抽象
//!
//! Controller 只依赖这个 trait，HTTP 实现见 [`http::HttpTaskService`]。

pub mod http;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{Task, TaskStatus};

pub use http::HttpTaskService;

/// 远端任务服务
///
/// 每个方法对应一次网络调用，不做重试。
#[async_trait]
pub trait TaskService: Send + Sync {
    /// `GET /tasks`，按服务端顺序返回全部任务
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// `POST /tasks`，返回服务端创建的任务（含分配的 id）
    async fn create_task(&self, title: &str) -> Result<Task>;

    /// `PUT /tasks/{id}`，返回更新后的任务
    async fn update_status(&self, id: &str, status: TaskStatus) -> Result<Task>;
}
