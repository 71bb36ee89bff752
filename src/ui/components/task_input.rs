//! 新任务输入框组件

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

use super::spinner_frame;

/// 输入框总高度：2 (边框) + 1 (输入行) + 1 (错误行)
pub const INPUT_HEIGHT: u16 = 4;

/// 输入框状态
pub struct InputView<'a> {
    pub input: &'a str,
    pub focused: bool,
    pub busy: bool,
    pub error: Option<&'a str>,
}

/// 渲染输入框 + 错误提示
pub fn render(frame: &mut Frame, area: Rect, view: &InputView, colors: &ThemeColors) {
    let border_color = if view.focused {
        colors.highlight
    } else {
        colors.border
    };
    let block = Block::default()
        .title(" New Task ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let [input_row, error_row] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner_area);

    // 右侧状态：提交中显示 spinner
    let status = status_spans(view, colors);
    let status_width: u16 = status.iter().map(|s| s.width() as u16).sum();
    let [text_area, status_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(status_width)])
            .areas(input_row);

    frame.render_widget(Paragraph::new(input_line(view, colors)), text_area);
    frame.render_widget(Paragraph::new(Line::from(status)), status_area);

    if let Some(error) = view.error {
        let line = Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(colors.error),
        ));
        frame.render_widget(Paragraph::new(line), error_row);
    }
}

fn input_line<'a>(view: &InputView<'a>, colors: &ThemeColors) -> Line<'a> {
    if view.input.is_empty() && !view.focused {
        return Line::from(Span::styled(
            "  Enter a new task...",
            Style::default().fg(colors.muted),
        ));
    }

    let text_color = if view.busy { colors.muted } else { colors.text };
    let mut spans = vec![
        Span::raw("  "),
        Span::styled(view.input, Style::default().fg(text_color)),
    ];
    // busy 时输入框禁用，不显示光标
    if view.focused && !view.busy {
        spans.push(Span::styled("█", Style::default().fg(colors.highlight)));
    }
    Line::from(spans)
}

fn status_spans(view: &InputView, colors: &ThemeColors) -> Vec<Span<'static>> {
    if view.busy {
        return vec![Span::styled(
            format!("{} Adding... ", spinner_frame()),
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        )];
    }
    if !view.focused {
        return Vec::new();
    }

    // 输入为空时 "Add Task" 置灰
    let enabled = !view.input.trim().is_empty();
    let key_color = if enabled { colors.highlight } else { colors.muted };
    vec![
        Span::styled("Enter", Style::default().fg(key_color)),
        Span::styled(" Add Task ", Style::default().fg(colors.muted)),
    ]
}
