//! TUI 应用状态
//!
//! `App` 持有 controller 和纯 UI 状态（焦点、选中行、配色）。
//! 网络请求在 tokio 上执行，结果通过 channel 回到主循环，
//! 由 [`App::poll_outcomes`] 按到达顺序交给 controller。

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error};

use crate::controller::{Outcome, Request, TaskListController};
use crate::error::TrackerError;
use crate::model::Task;
use crate::theme::{get_theme_colors, Theme, ThemeColors};

/// 键盘焦点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// 任务列表（导航、完成、刷新）
    #[default]
    List,
    /// 新任务输入框
    Input,
}

/// 全局应用状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,
    /// 任务列表 View-Model
    pub controller: TaskListController,
    /// 当前焦点
    pub focus: Focus,
    /// 选中的行
    pub selected: Option<usize>,
    /// 当前颜色方案
    pub colors: ThemeColors,
    /// Header 中显示的 backend 地址
    pub backend_label: String,
    /// 后台请求运行时
    runtime: Handle,
    /// 请求结果通道
    outcome_tx: mpsc::UnboundedSender<Outcome>,
    outcome_rx: mpsc::UnboundedReceiver<Outcome>,
    /// 进行中的请求数
    in_flight: usize,
    /// controller 状态变化通知
    revision_rx: watch::Receiver<u64>,
}

impl App {
    /// 创建应用并发起首次加载
    pub fn new(
        controller: TaskListController,
        runtime: Handle,
        theme: Theme,
        backend_label: impl Into<String>,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let revision_rx = controller.subscribe();

        let mut app = Self {
            should_quit: false,
            controller,
            focus: Focus::default(),
            selected: None,
            colors: get_theme_colors(theme),
            backend_label: backend_label.into(),
            runtime,
            outcome_tx,
            outcome_rx,
            in_flight: 0,
            revision_rx,
        };

        let request = app.controller.begin_load();
        app.dispatch(request);
        app
    }

    /// 在后台执行请求
    fn dispatch(&mut self, request: Request) {
        debug!(?request, "Dispatching request");
        self.in_flight += 1;

        let service = self.controller.service();
        let tx = self.outcome_tx.clone();
        let fallback = request.clone();
        let task = self
            .runtime
            .spawn(async move { request.execute(service.as_ref()).await });

        // 请求 panic 时也要回一个结果，否则 in_flight / busy 无法复位
        self.runtime.spawn(async move {
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(error = %e, "Request task failed");
                    fallback.failed(TrackerError::Background(e.to_string()))
                }
            };
            // 主循环已退出时丢弃结果
            let _ = tx.send(outcome);
        });
    }

    /// 取出所有已到达的结果并应用
    pub fn poll_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.controller.apply(outcome);
        }

        if self.revision_rx.has_changed().unwrap_or(false) {
            let _revision = *self.revision_rx.borrow_and_update();
            self.ensure_selection();
        }
    }

    /// 是否有请求进行中
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    // ========== Actions ==========

    /// 重新拉取列表
    pub fn reload(&mut self) {
        let request = self.controller.begin_load();
        self.dispatch(request);
    }

    /// 提交输入框
    ///
    /// busy 时不提交（对应原界面禁用按钮），controller 本身不做这个限制。
    pub fn submit_input(&mut self) {
        if !self.controller.can_submit() {
            return;
        }
        let title = self.controller.input().to_string();
        if let Some(request) = self.controller.begin_create(&title) {
            self.dispatch(request);
        }
    }

    /// 标记选中任务为完成（只对 pending 任务提供）
    pub fn complete_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        if !task.is_pending() {
            return;
        }
        let request = self.controller.begin_complete(&task.id);
        self.dispatch(request);
    }

    /// 输入字符（busy 时输入框禁用）
    pub fn input_char(&mut self, c: char) {
        if !self.controller.is_busy() {
            self.controller.push_input(c);
        }
    }

    /// 删除字符
    pub fn input_backspace(&mut self) {
        if !self.controller.is_busy() {
            self.controller.pop_input();
        }
    }

    pub fn focus_input(&mut self) {
        self.focus = Focus::Input;
    }

    pub fn focus_list(&mut self) {
        self.focus = Focus::List;
    }

    /// 退出应用
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ========== Selection ==========

    /// 当前选中的任务
    pub fn selected_task(&self) -> Option<&Task> {
        self.selected
            .and_then(|index| self.controller.tasks().get(index))
    }

    /// 列表变化后修正选中行
    pub fn ensure_selection(&mut self) {
        let len = self.controller.task_count();
        self.selected = match self.selected {
            _ if len == 0 => None,
            None => Some(0),
            Some(index) => Some(index.min(len - 1)),
        };
    }

    /// 选中下一项
    pub fn select_next(&mut self) {
        let len = self.controller.task_count();
        if len == 0 {
            return;
        }
        let current = self.selected.unwrap_or(0);
        self.selected = Some((current + 1) % len);
    }

    /// 选中上一项
    pub fn select_previous(&mut self) {
        let len = self.controller.task_count();
        if len == 0 {
            return;
        }
        let current = self.selected.unwrap_or(0);
        self.selected = Some(if current == 0 { len - 1 } else { current - 1 });
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use tokio::runtime::Runtime;

    use crate::controller::tests::{pending, FakeService};
    use crate::model::TaskStatus;

    pub(crate) fn new_app(runtime: &Runtime, service: &Arc<FakeService>) -> App {
        let controller = TaskListController::new(service.clone());
        App::new(
            controller,
            runtime.handle().clone(),
            Theme::Dark,
            "http://localhost:8001/api",
        )
    }

    /// 轮询直到所有请求返回
    pub(crate) fn wait_idle(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            app.poll_outcomes();
            if !app.is_loading() {
                return;
            }
            assert!(Instant::now() < deadline, "requests did not finish");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_initial_load_selects_first_row() {
        let runtime = Runtime::new().unwrap();
        let service = FakeService::with_tasks(vec![pending("a", "one"), pending("b", "two")]);
        let mut app = new_app(&runtime, &service);
        assert!(app.is_loading());

        wait_idle(&mut app);
        assert_eq!(app.controller.task_count(), 2);
        assert_eq!(app.selected, Some(0));
        assert_eq!(service.list_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_submit_prepends_and_clears_input() {
        let runtime = Runtime::new().unwrap();
        let service = FakeService::with_tasks(vec![pending("a", "one")]);
        let mut app = new_app(&runtime, &service);
        wait_idle(&mut app);

        for c in "Buy milk".chars() {
            app.input_char(c);
        }
        app.submit_input();
        assert!(app.controller.is_busy());

        // busy 时输入框禁用，重复提交被忽略
        app.input_char('!');
        app.submit_input();
        assert_eq!(app.controller.input(), "Buy milk");

        wait_idle(&mut app);
        assert!(!app.controller.is_busy());
        assert_eq!(app.controller.input(), "");
        assert_eq!(app.controller.tasks()[0].title, "Buy milk");
        assert_eq!(service.create_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_blank_submit_sends_nothing() {
        let runtime = Runtime::new().unwrap();
        let service = FakeService::with_tasks(vec![]);
        let mut app = new_app(&runtime, &service);
        wait_idle(&mut app);

        app.input_char(' ');
        app.submit_input();
        assert!(!app.is_loading());
        assert_eq!(service.create_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_complete_selected_only_for_pending() {
        let runtime = Runtime::new().unwrap();
        let mut done = pending("b", "two");
        done.status = TaskStatus::Completed;
        let service = FakeService::with_tasks(vec![pending("a", "one"), done]);
        let mut app = new_app(&runtime, &service);
        wait_idle(&mut app);

        app.select_next();
        app.complete_selected();
        assert!(!app.is_loading());

        app.select_previous();
        app.complete_selected();
        wait_idle(&mut app);
        assert_eq!(app.controller.tasks()[0].status, TaskStatus::Completed);
        assert_eq!(service.update_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_selection_clamps_after_reload() {
        let runtime = Runtime::new().unwrap();
        let service = FakeService::with_tasks(vec![
            pending("a", "one"),
            pending("b", "two"),
            pending("c", "three"),
        ]);
        let mut app = new_app(&runtime, &service);
        wait_idle(&mut app);
        app.select_previous();
        assert_eq!(app.selected, Some(2));

        service.tasks.lock().unwrap().truncate(1);
        app.reload();
        wait_idle(&mut app);
        assert_eq!(app.selected, Some(0));

        service.tasks.lock().unwrap().clear();
        app.reload();
        wait_idle(&mut app);
        assert_eq!(app.selected, None);
        assert!(app.selected_task().is_none());
    }

    #[test]
    fn test_panicking_request_still_finishes() {
        let runtime = Runtime::new().unwrap();
        let service = FakeService::with_tasks(vec![pending("a", "one")]);
        let mut app = new_app(&runtime, &service);
        wait_idle(&mut app);

        service.panic_list.store(true, Ordering::SeqCst);
        app.reload();
        assert!(app.is_loading());
        wait_idle(&mut app);

        assert!(!app.is_loading());
        assert_eq!(app.controller.error(), Some("Failed to load tasks"));
        assert_eq!(app.controller.task_count(), 1);
    }

    #[test]
    fn test_failed_reload_surfaces_error() {
        let runtime = Runtime::new().unwrap();
        let service = FakeService::with_tasks(vec![pending("a", "one")]);
        let mut app = new_app(&runtime, &service);
        wait_idle(&mut app);

        service.fail_list.store(true, Ordering::SeqCst);
        app.reload();
        wait_idle(&mut app);
        assert_eq!(app.controller.error(), Some("Failed to load tasks"));
        assert_eq!(app.controller.task_count(), 1);
    }
}
