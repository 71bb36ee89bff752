//! 系统主题检测

use std::process::Command;

/// 检测系统是否为深色模式
///
/// 优先读取终端的 `COLORFGBG`，其次读取 macOS 的 AppleInterfaceStyle。
/// 都无法判断时返回 `false`（浅色）。
pub fn detect_system_theme() -> bool {
    if let Some(dark) = std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| parse_colorfgbg(&v))
    {
        return dark;
    }

    Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .map(|output| {
            output.status.success()
                && String::from_utf8_lossy(&output.stdout)
                    .trim()
                    .eq_ignore_ascii_case("dark")
        })
        .unwrap_or(false)
}

/// 解析 "fg;bg" 或 "fg;default;bg"，背景色为 0-6 或 8 视为深色
fn parse_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(bg < 7 || bg == 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colorfgbg() {
        assert_eq!(parse_colorfgbg("15;0"), Some(true));
        assert_eq!(parse_colorfgbg("0;15"), Some(false));
        assert_eq!(parse_colorfgbg("15;default;8"), Some(true));
        assert_eq!(parse_colorfgbg("garbage"), None);
    }

    #[test]
    fn test_detect_system_theme() {
        // 只是确保函数不会 panic
        let _is_dark = detect_system_theme();
    }
}
