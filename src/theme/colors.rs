//! 主题颜色定义

use ratatui::style::Color;

use super::ThemeColors;

/// 深色主题
pub fn dark_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(24, 24, 24),           // 深灰背景
        bg_secondary: Color::Rgb(48, 48, 48), // 选中行背景
        highlight: Color::Rgb(96, 165, 250),  // 蓝色
        text: Color::White,
        muted: Color::Rgb(128, 128, 128),
        border: Color::Rgb(68, 68, 68),
        status_pending: Color::Rgb(250, 204, 21),  // 黄色
        status_completed: Color::Rgb(74, 222, 128), // 绿色
        error: Color::Rgb(255, 85, 85),
    }
}

/// 浅色主题
pub fn light_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(250, 250, 250),
        bg_secondary: Color::Rgb(230, 230, 230),
        highlight: Color::Rgb(37, 99, 235),
        text: Color::Rgb(30, 30, 30),
        muted: Color::Rgb(120, 120, 120),
        border: Color::Rgb(200, 200, 200),
        status_pending: Color::Rgb(161, 98, 7),
        status_completed: Color::Rgb(22, 101, 52),
        error: Color::Rgb(200, 50, 50),
    }
}
