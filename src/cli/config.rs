//! `task-tracker config`：查看或修改配置

use std::path::Path;

use crate::error::Result;
use crate::logging;
use crate::storage::config::{self, Config, Settings, BACKEND_URL_ENV};
use crate::theme::Theme;

/// 执行 config 命令，返回退出码
pub fn execute(cli_url: Option<&str>, set_url: Option<&str>) -> i32 {
    let result = config::config_path().and_then(|path| match set_url {
        Some(url) => set_backend_url(&path, url),
        None => show(&path, cli_url),
    });

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// 校验后写入新的 backend 地址
fn set_backend_url(path: &Path, url: &str) -> Result<()> {
    let mut config = config::load_config_from(path)?;
    config.backend.url = url.trim().to_string();

    // 只校验配置文件本身，不受环境变量影响
    let settings = Settings::resolve(&config, None, None)?;
    config::save_config_to(path, &config)?;

    println!("Saved backend URL to {}", path.display());
    println!("Tasks API: {}", settings.api_base);
    Ok(())
}

/// 打印解析后的配置
fn show(path: &Path, cli_url: Option<&str>) -> Result<()> {
    let config = config::load_config_from(path)?;
    let env_url = std::env::var(BACKEND_URL_ENV).ok();
    let settings = Settings::resolve(&config, cli_url, env_url.as_deref())?;

    for line in describe(path, &config, &settings, env_url.as_deref()) {
        println!("{}", line);
    }
    Ok(())
}

fn describe(
    path: &Path,
    config: &Config,
    settings: &Settings,
    env_url: Option<&str>,
) -> Vec<String> {
    let mut lines = vec![
        format!("Config file:  {}", path.display()),
        format!("Backend URL:  {}", config.backend.url),
    ];
    if let Some(env_url) = env_url {
        lines.push(format!("  overridden by {}={}", BACKEND_URL_ENV, env_url));
    }
    lines.push(format!("Tasks API:    {}", settings.api_base));
    lines.push(format!(
        "Timeout:      {}",
        settings
            .timeout
            .map(|t| format!("{}s", t.as_secs()))
            .unwrap_or_else(|| "none".to_string())
    ));
    lines.push(format!(
        "Theme:        {}",
        Theme::from_name(&settings.theme).label()
    ));
    lines.push(format!("Log level:    {}", settings.log_level));
    if let Ok(log_path) = logging::log_file_path() {
        lines.push(format!("Log file:     {}", log_path.display()));
    }
    lines
}
