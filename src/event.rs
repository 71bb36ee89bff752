use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Focus};

/// 处理事件，返回 true 表示应该继续运行
pub fn handle_events(app: &mut App) -> io::Result<bool> {
    // 轮询事件（100ms 超时，期间后台请求照常返回）
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            // 只处理按下事件
            if key.kind == KeyEventKind::Press {
                handle_key(app, key);
            }
        }
    }

    Ok(!app.should_quit)
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C 任何时候都退出
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return;
    }

    match app.focus {
        Focus::Input => handle_input_key(app, key),
        Focus::List => handle_list_key(app, key),
    }
}

/// 处理输入框的键盘事件
fn handle_input_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 返回列表
        KeyCode::Esc => app.focus_list(),

        // 提交
        KeyCode::Enter => app.submit_input(),

        // 删除字符
        KeyCode::Backspace => app.input_backspace(),

        // 输入字符
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input_char(c);
        }

        _ => {}
    }
}

/// 处理列表的键盘事件
fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // 退出
        KeyCode::Char('q') => app.quit(),

        // 导航 - 下移
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),

        // 导航 - 上移
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),

        // 切到输入框
        KeyCode::Char('i') | KeyCode::Char('a') | KeyCode::Char('n') | KeyCode::Tab => {
            app.focus_input();
        }

        // 标记完成
        KeyCode::Enter | KeyCode::Char('c') => app.complete_selected(),

        // 重新加载
        KeyCode::Char('r') | KeyCode::Char('R') => app.reload(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use tokio::runtime::Runtime;

    use crate::app::tests::{new_app, wait_idle};
    use crate::controller::tests::{pending, FakeService};
    use crate::model::TaskStatus;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_in_list_does_not_edit_input() {
        let runtime = Runtime::new().unwrap();
        let service = FakeService::with_tasks(vec![]);
        let mut app = new_app(&runtime, &service);
        wait_idle(&mut app);

        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.controller.input(), "");
        assert_eq!(app.focus, Focus::List);
    }

    #[test]
    fn test_add_task_via_keys() {
        let runtime = Runtime::new().unwrap();
        let service = FakeService::with_tasks(vec![]);
        let mut app = new_app(&runtime, &service);
        wait_idle(&mut app);

        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.focus, Focus::Input);

        // 输入框里 'q' 是普通字符
        type_text(&mut app, "Buy milkq");
        press(&mut app, KeyCode::Backspace);
        assert!(!app.should_quit);
        assert_eq!(app.controller.input(), "Buy milk");

        press(&mut app, KeyCode::Enter);
        wait_idle(&mut app);
        assert_eq!(app.controller.tasks()[0].title, "Buy milk");
        assert_eq!(app.controller.input(), "");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::List);
    }

    #[test]
    fn test_complete_and_reload_keys() {
        let runtime = Runtime::new().unwrap();
        let service = FakeService::with_tasks(vec![pending("a", "one")]);
        let mut app = new_app(&runtime, &service);
        wait_idle(&mut app);

        press(&mut app, KeyCode::Char('c'));
        wait_idle(&mut app);
        assert_eq!(app.controller.tasks()[0].status, TaskStatus::Completed);

        press(&mut app, KeyCode::Char('r'));
        wait_idle(&mut app);
        assert_eq!(service.list_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_quit_keys() {
        let runtime = Runtime::new().unwrap();
        let service = FakeService::with_tasks(vec![]);
        let mut app = new_app(&runtime, &service);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = new_app(&runtime, &service);
        app.focus_input();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
