use std::time::{SystemTime, UNIX_EPOCH};

/// 截断字符串到指定最大长度，超出部分用省略号替代
pub fn truncate(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}…", s.chars().take(max_len - 1).collect::<String>())
    }
}

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// 当前 spinner 帧（基于时间，每 100ms 切换）
pub fn spinner_frame() -> char {
    let tick = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        / 100;
    SPINNER_FRAMES[(tick as usize) % SPINNER_FRAMES.len()]
}

pub mod empty_state;
pub mod footer;
pub mod header;
pub mod task_input;
pub mod task_list;
