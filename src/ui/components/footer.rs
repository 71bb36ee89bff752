//! 底部快捷键栏

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::Focus;
use crate::theme::ThemeColors;

/// 渲染底部快捷键提示栏
pub fn render(
    frame: &mut Frame,
    area: Rect,
    focus: Focus,
    can_complete: bool,
    colors: &ThemeColors,
) {
    let shortcuts = get_shortcuts(focus, can_complete);

    let mut spans = Vec::new();
    spans.push(Span::raw("  "));

    for (i, (key, desc)) in shortcuts.iter().enumerate() {
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", desc),
            Style::default().fg(colors.muted),
        ));

        if i < shortcuts.len() - 1 {
            spans.push(Span::raw("   "));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

/// 快捷键列表，"complete" 只对选中的 pending 任务显示
fn get_shortcuts(focus: Focus, can_complete: bool) -> Vec<(&'static str, &'static str)> {
    match focus {
        Focus::Input => vec![("Enter", "add"), ("Esc", "back")],
        Focus::List => {
            let mut shortcuts = vec![("i", "new"), ("j/k", "move")];
            if can_complete {
                shortcuts.push(("c", "complete"));
            }
            shortcuts.push(("r", "reload"));
            shortcuts.push(("q", "quit"));
            shortcuts
        }
    }
}
