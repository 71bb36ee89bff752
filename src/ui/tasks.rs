//! 任务页面渲染

use chrono::Utc;
use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::{Block, Widget},
    Frame,
};

use crate::app::{App, Focus};

use super::components::{
    footer, header,
    task_input::{self, InputView},
    task_list,
};

/// 渲染任务页面
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let colors = &app.colors;

    // 填充整个背景
    Block::default()
        .style(Style::default().bg(colors.bg))
        .render(area, frame.buffer_mut());

    let [header_area, input_area, list_area, footer_area] = Layout::vertical([
        Constraint::Length(header::HEADER_HEIGHT),
        Constraint::Length(task_input::INPUT_HEIGHT),
        Constraint::Fill(1),
        Constraint::Length(3),
    ])
    .areas(area);

    header::render(
        frame,
        header_area,
        &app.backend_label,
        app.is_loading(),
        colors,
    );

    let controller = &app.controller;
    let input_view = InputView {
        input: controller.input(),
        focused: app.focus == Focus::Input,
        busy: controller.is_busy(),
        error: controller.error(),
    };
    task_input::render(frame, input_area, &input_view, colors);

    task_list::render(
        frame,
        list_area,
        controller.tasks(),
        app.selected,
        app.focus == Focus::List,
        Utc::now(),
        colors,
    );

    let can_complete = app.selected_task().is_some_and(|t| t.is_pending());
    footer::render(frame, footer_area, app.focus, can_complete, colors);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::runtime::Runtime;

    use crate::app::tests::{new_app, wait_idle};
    use crate::controller::tests::FakeService;

    /// 渲染一帧并返回屏幕文本
    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_add_and_complete_scenario() {
        let runtime = Runtime::new().unwrap();
        let service = FakeService::with_tasks(vec![]);
        let mut app = new_app(&runtime, &service);
        wait_idle(&mut app);

        let screen = draw(&app);
        assert!(screen.contains("No tasks yet. Add your first task above!"));
        assert!(screen.contains("Tasks (0)"));

        app.focus_input();
        for c in "Buy milk".chars() {
            app.input_char(c);
        }
        app.submit_input();
        wait_idle(&mut app);
        app.focus_list();

        let screen = draw(&app);
        assert!(screen.contains("Tasks (1)"));
        assert!(screen.contains("Buy milk"));
        assert!(screen.contains("Pending"));
        assert!(screen.contains("complete"));
        assert!(screen.contains("Enter a new task..."));
        assert!(!screen.contains("No tasks yet"));

        app.complete_selected();
        wait_idle(&mut app);

        let screen = draw(&app);
        assert!(screen.contains("Completed"));
        assert!(!screen.contains("Pending"));
        // 已完成任务不再提供 complete 操作
        assert!(!screen.contains("complete"));
    }

    #[test]
    fn test_error_line_is_rendered() {
        let runtime = Runtime::new().unwrap();
        let service = FakeService::with_tasks(vec![]);
        service
            .fail_list
            .store(true, std::sync::atomic::Ordering::SeqCst);
        let mut app = new_app(&runtime, &service);
        wait_idle(&mut app);

        let screen = draw(&app);
        assert!(screen.contains("Failed to load tasks"));
        assert!(screen.contains("Tasks (0)"));
    }
}
