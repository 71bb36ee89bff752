use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::ThemeColors;

use super::{spinner_frame, truncate};

/// Header 总高度：1 (上边框) + 1 (标题行) + 1 (下边框)
pub const HEADER_HEIGHT: u16 = 3;

/// 渲染顶部标题栏（应用名 + backend 地址，请求进行中显示 spinner）
pub fn render(
    frame: &mut Frame,
    area: Rect,
    backend_label: &str,
    loading: bool,
    colors: &ThemeColors,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let left = vec![
        Span::styled(
            " Task Tracker",
            Style::default()
                .fg(colors.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Manage your tasks efficiently",
            Style::default().fg(colors.muted),
        ),
    ];
    let label = truncate(backend_label, (inner_area.width / 2) as usize);
    let mut right = Vec::new();
    if loading {
        right.push(Span::styled(
            format!("{} Syncing  ", spinner_frame()),
            Style::default().fg(colors.highlight),
        ));
    }
    right.push(Span::styled(
        format!("{} ", label),
        Style::default().fg(colors.muted),
    ));

    // 计算中间填充空格
    let used_width: usize = left.iter().chain(right.iter()).map(|s| s.width()).sum();
    let padding_len = (inner_area.width as usize).saturating_sub(used_width);

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.extend(right);

    frame.render_widget(Paragraph::new(Line::from(spans)), inner_area);
}
