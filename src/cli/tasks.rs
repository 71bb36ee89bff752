//! 非交互式任务命令（list / add / complete）
//!
//! 每个命令都通过 `TaskListController` 执行，错误处理与 TUI 一致：
//! controller 设置了错误提示时打印到 stderr 并返回退出码 1。

use std::sync::Arc;

use crate::controller::{Outcome, TaskListController};
use crate::model::Task;
use crate::service::TaskService;

/// 格式化单行任务输出: "○ {id}  Pending    {title}"
pub fn format_task_line(task: &Task) -> String {
    format!(
        "{} {}  {:<9}  {}",
        task.status.icon(),
        task.id,
        task.status.label(),
        task.title
    )
}

/// controller 出错时打印并返回 1
fn exit_code(controller: &TaskListController) -> i32 {
    match controller.error() {
        Some(message) => {
            eprintln!("Error: {}", message);
            1
        }
        None => 0,
    }
}

/// 列出所有任务
pub async fn list(service: Arc<dyn TaskService>, json: bool) -> i32 {
    let mut controller = TaskListController::new(service);
    controller.load().await;
    if controller.error().is_some() {
        return exit_code(&controller);
    }

    if json {
        match serde_json::to_string_pretty(controller.tasks()) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
        return 0;
    }

    println!("Tasks ({})", controller.task_count());
    if controller.task_count() == 0 {
        println!("No tasks yet. Add one with: task-tracker add <TITLE>");
    }
    for task in controller.tasks() {
        println!("{}", format_task_line(task));
    }
    0
}

/// 添加任务（标题为空时什么也不做）
pub async fn add(service: Arc<dyn TaskService>, title: &str) -> i32 {
    let mut controller = TaskListController::new(service);
    controller.set_input(title);
    controller.submit().await;

    if title.trim().is_empty() {
        eprintln!("Nothing to add: task title is empty");
        return 0;
    }
    if let Some(task) = controller.tasks().first() {
        println!("Created: {}", format_task_line(task));
    }
    exit_code(&controller)
}

/// 标记任务完成
///
/// 只发一次 PUT，不先拉列表，也不校验 id 是否存在；打印服务端返回的任务。
pub async fn complete(service: Arc<dyn TaskService>, id: &str) -> i32 {
    let mut controller = TaskListController::new(service);
    let request = controller.begin_complete(id);
    let outcome = request.execute(controller.service().as_ref()).await;

    let updated = match &outcome {
        Outcome::Completed { result: Ok(task), .. } => Some(task.clone()),
        _ => None,
    };
    controller.apply(outcome);

    match updated {
        Some(task) => {
            println!("Updated: {}", format_task_line(&task));
            0
        }
        None => exit_code(&controller),
    }
}
