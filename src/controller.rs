//! 任务列表 View-Model
//!
//! `TaskListController` 持有任务列表、输入框内容、busy 标志和错误提示，
//! 通过 [`TaskService`] 完成 list / create / complete 三个操作。
//!
//! 每个操作拆成三步：
//! 1. `begin_*`：在 UI 线程上检查前置条件并修改请求前的状态，返回 [`Request`]
//! 2. [`Request::execute`]：唯一的挂起点，执行一次网络调用，产出 [`Outcome`]
//! 3. [`TaskListController::apply`]：回到 UI 线程，把结果写回状态
//!
//! TUI 把第 2 步放到 tokio 上执行，结果按到达顺序 apply；
//! CLI 和测试直接用 `load` / `create` / `complete` 串起三步。

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::error::{FailureKind, Result, TrackerError};
use crate::model::{Task, TaskStatus};
use crate::service::TaskService;

/// 待执行的网络请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// 拉取完整列表
    Load,
    /// 创建任务（标题按用户输入原样发送）
    Create { title: String },
    /// 标记任务完成
    Complete { id: String },
}

impl Request {
    /// 执行请求，不访问 controller 状态
    pub async fn execute(self, service: &dyn TaskService) -> Outcome {
        match self {
            Request::Load => Outcome::Loaded(service.list_tasks().await),
            Request::Create { title } => Outcome::Created(service.create_task(&title).await),
            Request::Complete { id } => {
                let result = service.update_status(&id, TaskStatus::Completed).await;
                Outcome::Completed { id, result }
            }
        }
    }

    /// 请求没有正常返回时，构造同类型的失败结果
    pub fn failed(self, err: TrackerError) -> Outcome {
        match self {
            Request::Load => Outcome::Loaded(Err(err)),
            Request::Create { .. } => Outcome::Created(Err(err)),
            Request::Complete { id } => Outcome::Completed {
                id,
                result: Err(err),
            },
        }
    }
}

/// 请求结果，交给 [`TaskListController::apply`]
#[derive(Debug)]
pub enum Outcome {
    Loaded(Result<Vec<Task>>),
    Created(Result<Task>),
    Completed { id: String, result: Result<Task> },
}

/// 任务列表 View-Model
pub struct TaskListController {
    service: Arc<dyn TaskService>,
    /// 服务端顺序，新建任务插在最前
    tasks: Vec<Task>,
    /// 输入框内容
    input: String,
    /// 创建请求进行中
    busy: bool,
    /// 最近一次失败的提示（只保留一条）
    error: Option<String>,
    /// 每次状态变化递增
    revision: watch::Sender<u64>,
}

impl TaskListController {
    pub fn new(service: Arc<dyn TaskService>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            service,
            tasks: Vec::new(),
            input: String::new(),
            busy: false,
            error: None,
            revision,
        }
    }

    /// 获取 service 句柄（用于在后台执行请求）
    pub fn service(&self) -> Arc<dyn TaskService> {
        Arc::clone(&self.service)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// 按 id 查找任务
    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 当前输入能否提交（与原界面的按钮禁用条件一致）
    pub fn can_submit(&self) -> bool {
        !self.busy && !self.input.trim().is_empty()
    }

    // ========== Notify ==========

    /// 订阅状态变化，值为当前 revision
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    // ========== Input ==========

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
        self.notify();
    }

    /// 输入字符
    pub fn push_input(&mut self, c: char) {
        self.input.push(c);
        self.notify();
    }

    /// 删除字符
    pub fn pop_input(&mut self) {
        if self.input.pop().is_some() {
            self.notify();
        }
    }

    // ========== Begin ==========

    /// 准备 load 请求（请求前不改状态）
    pub fn begin_load(&self) -> Request {
        Request::Load
    }

    /// 准备 create 请求
    ///
    /// 标题 trim 后为空时返回 `None`：不发请求、不设错误。
    /// 否则置 busy 并清除旧错误。
    pub fn begin_create(&mut self, title: &str) -> Option<Request> {
        if title.trim().is_empty() {
            return None;
        }
        self.busy = true;
        self.error = None;
        self.notify();
        Some(Request::Create {
            title: title.to_string(),
        })
    }

    /// 准备 complete 请求
    ///
    /// 不校验 id 是否存在，也不做 busy 限制。
    pub fn begin_complete(&self, id: &str) -> Request {
        Request::Complete { id: id.to_string() }
    }

    // ========== Apply ==========

    /// 把请求结果写回状态
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Loaded(Ok(tasks)) => {
                info!(count = tasks.len(), "Loaded tasks");
                self.tasks = tasks;
            }
            Outcome::Loaded(Err(e)) => self.fail(FailureKind::Load, &e),
            Outcome::Created(result) => {
                // 无论成功失败都复位 busy
                self.busy = false;
                match result {
                    Ok(task) => {
                        info!(id = %task.id, "Created task");
                        self.tasks.insert(0, task);
                        self.input.clear();
                    }
                    Err(e) => self.fail(FailureKind::Create, &e),
                }
            }
            Outcome::Completed { id, result } => match result {
                Ok(task) => match self.tasks.iter_mut().find(|t| t.id == id) {
                    Some(slot) => {
                        info!(%id, status = task.status.as_str(), "Updated task");
                        *slot = task;
                    }
                    None => warn!(%id, "Updated task is not in the local list"),
                },
                Err(e) => {
                    warn!(%id, "Update failed");
                    self.fail(FailureKind::Update, &e);
                }
            },
        }
        self.notify();
    }

    fn fail(&mut self, kind: FailureKind, err: &TrackerError) {
        error!(error = %err, "{}", kind.log_context());
        self.error = Some(kind.message().to_string());
    }

    // ========== Operations ==========

    /// 拉取完整列表并替换本地状态
    pub async fn load(&mut self) {
        let request = self.begin_load();
        self.run(request).await;
    }

    /// 创建任务，成功后插到列表最前并清空输入
    pub async fn create(&mut self, title: &str) {
        if let Some(request) = self.begin_create(title) {
            self.run(request).await;
        }
    }

    /// 提交输入框内容
    pub async fn submit(&mut self) {
        let title = self.input.clone();
        self.create(&title).await;
    }

    /// 标记任务完成
    pub async fn complete(&mut self, id: &str) {
        let request = self.begin_complete(id);
        self.run(request).await;
    }

    async fn run(&mut self, request: Request) {
        let service = self.service();
        let outcome = request.execute(service.as_ref()).await;
        self.apply(outcome);
    }
}

// ============================================================================
// Tests
// ============================================================================
