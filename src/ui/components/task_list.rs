use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::model::{format_age, Task, TaskStatus};
use crate::theme::ThemeColors;

use super::empty_state;

/// 渲染任务列表（标题带任务数）
pub fn render(
    frame: &mut Frame,
    area: Rect,
    tasks: &[Task],
    selected_index: Option<usize>,
    focused: bool,
    now: DateTime<Utc>,
    colors: &ThemeColors,
) {
    let border_color = if focused {
        colors.highlight
    } else {
        colors.border
    };
    let block = Block::default()
        .title(format!(" Tasks ({}) ", tasks.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if tasks.is_empty() {
        let inner_area = block.inner(area);
        frame.render_widget(block, area);
        empty_state::render(frame, inner_area, colors);
        return;
    }

    // 表头
    let header = Row::new(vec![
        Cell::from(""), // 选择指示器
        Cell::from(""), // 状态图标
        Cell::from("TASK"),
        Cell::from("STATUS"),
        Cell::from("AGE"),
    ])
    .style(Style::default().fg(colors.muted))
    .height(1)
    .bottom_margin(1);

    // 数据行
    let rows: Vec<Row> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let is_selected = selected_index == Some(i);
            let selector = if is_selected && focused { "❯" } else { " " };

            let status_color = match task.status {
                TaskStatus::Pending => colors.status_pending,
                TaskStatus::Completed => colors.status_completed,
            };

            // 已完成任务：划线 + 灰色
            let title_style = match task.status {
                TaskStatus::Pending => Style::default().fg(colors.text),
                TaskStatus::Completed => Style::default()
                    .fg(colors.muted)
                    .add_modifier(Modifier::CROSSED_OUT),
            };

            Row::new(vec![
                Cell::from(selector).style(Style::default().fg(colors.highlight)),
                Cell::from(task.status.icon()).style(Style::default().fg(status_color)),
                Cell::from(task.title.clone()).style(title_style),
                Cell::from(task.status.label()).style(
                    Style::default()
                        .fg(status_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Cell::from(format_age(task.created_at, now))
                    .style(Style::default().fg(colors.muted)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(2),  // 选择器
        Constraint::Length(2),  // 状态图标
        Constraint::Fill(1),    // TASK (flex)
        Constraint::Length(10), // STATUS
        Constraint::Length(9),  // AGE
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(colors.bg_secondary));

    let mut table_state = TableState::default();
    table_state.select(selected_index);

    frame.render_stateful_widget(table, area, &mut table_state);
}
