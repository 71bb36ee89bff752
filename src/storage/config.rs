//! 应用配置持久化
//!
//! 配置文件位于 `~/.task-tracker/config.toml`，不存在时使用默认值。
//! Backend 地址在启动时解析一次（见 [`Settings::resolve`]），之后不再变化。

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::{app_dir, load_toml, save_toml};
use crate::error::{Result, TrackerError};

/// 覆盖配置文件中 backend 地址的环境变量
pub const BACKEND_URL_ENV: &str = "TASK_TRACKER_BACKEND_URL";

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// TaskService 连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// 服务根地址 (e.g., "http://localhost:8001")
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// 路由前缀，任务接口挂在其下
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// 传输层超时（秒），不设置则不限制
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_backend_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            api_prefix: default_api_prefix(),
            timeout_secs: None,
        }
    }
}

/// 主题配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Auto".to_string(),
        }
    }
}

/// 日志配置（`RUST_LOG` 优先）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// 获取配置文件路径
pub fn config_path() -> Result<PathBuf> {
    Ok(app_dir()?.join("config.toml"))
}

/// 加载配置（不存在则返回默认值）
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// 从指定路径加载配置
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    load_toml(path)
}

/// 保存配置到指定路径
pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    save_toml(path, config)
}

/// 启动时解析出的运行设置
#[derive(Debug, Clone)]
pub struct Settings {
    /// 任务接口根地址（已拼接 api_prefix）
    pub api_base: Url,
    /// 传输层超时
    pub timeout: Option<Duration>,
    /// 主题名称
    pub theme: String,
    /// 日志级别
    pub log_level: String,
}

impl Settings {
    /// 解析 backend 地址
    ///
    /// 优先级: `--backend-url` > `TASK_TRACKER_BACKEND_URL` > 配置文件 > 默认值
    pub fn resolve(config: &Config, cli_url: Option<&str>, env_url: Option<&str>) -> Result<Self> {
        // 空字符串视为未设置
        let base = [cli_url, env_url]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(config.backend.url.trim());

        Ok(Self {
            api_base: build_api_base(base, &config.backend.api_prefix)?,
            timeout: config.backend.timeout_secs.map(Duration::from_secs),
            theme: config.theme.name.clone(),
            log_level: config.log.level.clone(),
        })
    }

    /// 从环境变量读取覆盖值后解析
    pub fn from_env(config: &Config, cli_url: Option<&str>) -> Result<Self> {
        let env_url = std::env::var(BACKEND_URL_ENV).ok();
        Self::resolve(config, cli_url, env_url.as_deref())
    }
}

/// 拼接 "{base}{prefix}" 并校验
fn build_api_base(base: &str, prefix: &str) -> Result<Url> {
    if base.is_empty() {
        return Err(TrackerError::config("backend.url is empty"));
    }

    let prefix = prefix.trim().trim_matches('/');
    let joined = if prefix.is_empty() {
        base.trim_end_matches('/').to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), prefix)
    };

    let url = Url::parse(&joined)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(TrackerError::config(format!(
            "backend URL must be http or https: {}",
            joined
        )));
    }
    if url.cannot_be_a_base() {
        return Err(TrackerError::config(format!(
            "backend URL cannot be used as a base: {}",
            joined
        )));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.backend.url, "http://localhost:8001");
        assert_eq!(config.backend.api_prefix, "/api");
        assert_eq!(config.theme.name, "Auto");
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[backend]\nurl = \"https://tasks.example.com\"\n\n[unknown]\nkey = 1\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.backend.url, "https://tasks.example.com");
        assert_eq!(config.backend.api_prefix, "/api");
        assert!(config.backend.timeout_secs.is_none());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[backend\nurl = ").unwrap();
        assert!(matches!(
            load_config_from(&path),
            Err(TrackerError::TomlParse(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.backend.url = "http://10.0.0.5:9000".to_string();
        config.backend.timeout_secs = Some(7);
        save_config_to(&path, &config).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.backend.url, "http://10.0.0.5:9000");
        assert_eq!(loaded.backend.timeout_secs, Some(7));
    }

    #[test]
    fn test_resolve_precedence() {
        let config = Config::default();

        let s = Settings::resolve(&config, None, None).unwrap();
        assert_eq!(s.api_base.as_str(), "http://localhost:8001/api");

        let s = Settings::resolve(&config, None, Some("http://env:1")).unwrap();
        assert_eq!(s.api_base.as_str(), "http://env:1/api");

        let s = Settings::resolve(&config, Some("http://cli:2/"), Some("http://env:1")).unwrap();
        assert_eq!(s.api_base.as_str(), "http://cli:2/api");

        // 空的覆盖值视为未设置
        let s = Settings::resolve(&config, Some("  "), None).unwrap();
        assert_eq!(s.api_base.as_str(), "http://localhost:8001/api");
    }

    #[test]
    fn test_resolve_prefix_variants() {
        let mut config = Config::default();
        config.backend.api_prefix = "v1/".to_string();
        let s = Settings::resolve(&config, None, None).unwrap();
        assert_eq!(s.api_base.as_str(), "http://localhost:8001/v1");

        config.backend.api_prefix = String::new();
        config.backend.timeout_secs = Some(3);
        let s = Settings::resolve(&config, None, None).unwrap();
        assert_eq!(s.api_base.as_str(), "http://localhost:8001/");
        assert_eq!(s.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_resolve_rejects_bad_urls() {
        let config = Config::default();
        assert!(Settings::resolve(&config, Some("localhost:8001"), None).is_err());
        assert!(Settings::resolve(&config, Some("ftp://host"), None).is_err());
        assert!(Settings::resolve(&config, Some("not a url"), None).is_err());
    }
}
