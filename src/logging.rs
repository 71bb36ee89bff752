//! 日志初始化
//!
//! TUI 模式下终端被 ratatui 占用，日志写入 `~/.task-tracker/logs/task-tracker.log`；
//! 子命令直接写 stderr。级别优先取 `RUST_LOG`，其次取配置文件中的 `log.level`。

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::Result;
use crate::storage;

/// 日志输出目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// 追加写入日志文件
    File,
    /// 写 stderr
    Stderr,
}

/// 日志文件路径
pub fn log_file_path() -> Result<PathBuf> {
    Ok(storage::ensure_logs_dir()?.join("task-tracker.log"))
}

/// 构造过滤器（`RUST_LOG` 优先）
fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 初始化全局 subscriber（只调用一次）
pub fn init(target: LogTarget, default_level: &str) -> Result<()> {
    let filter = build_filter(default_level);

    match target {
        LogTarget::File => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file_path()?)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
    }

    Ok(())
}
