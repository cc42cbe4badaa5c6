//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，再用环境变量（含 `.env`）覆盖敏感项。
//! 配置在进程启动时构建一次，按需传给各数据源客户端。

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API Key（为空则不启用认证）
    #[serde(default)]
    pub api_key: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Tushare 接口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TushareConfig {
    /// 接口 Token（为空则相关数据走兜底逻辑）
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_tushare_url")]
    pub base_url: String,
}

/// 新浪行情接口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinaConfig {
    #[serde(default = "default_sina_url")]
    pub base_url: String,
}

/// 网易财经接口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeteaseConfig {
    #[serde(default = "default_netease_url")]
    pub base_url: String,
}

/// 数据目录配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// JSON 数据文件存放目录
    #[serde(default = "default_data_dir")]
    pub dir: PathBuf,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub tushare: TushareConfig,
    #[serde(default)]
    pub sina: SinaConfig,
    #[serde(default)]
    pub netease: NeteaseConfig,
    #[serde(default)]
    pub data: DataConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }
fn default_log_level() -> String { "info".to_string() }
fn default_tushare_url() -> String { "https://api.tushare.pro".to_string() }
fn default_sina_url() -> String { "https://hq.sinajs.cn".to_string() }
fn default_netease_url() -> String { "https://quotes.money.163.com".to_string() }
fn default_data_dir() -> PathBuf { PathBuf::from("data") }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TushareConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_tushare_url(),
        }
    }
}

impl Default for SinaConfig {
    fn default() -> Self {
        Self { base_url: default_sina_url() }
    }
}

impl Default for NeteaseConfig {
    fn default() -> Self {
        Self { base_url: default_netease_url() }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { dir: default_data_dir() }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl TushareConfig {
    /// 是否配置了 Token
    pub fn has_token(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从指定文件或默认位置读取，失败则使用默认值，
    /// 最后应用环境变量覆盖
    pub fn load(explicit: Option<&Path>) -> Self {
        let mut config = match explicit {
            Some(path) => Self::from_file(path).unwrap_or_else(|e| {
                log::warn!("加载配置文件 {} 失败: {}，使用默认配置", path.display(), e);
                Self::default()
            }),
            None => Self::from_default_paths(),
        };

        config.apply_env(|name| env::var(name).ok());
        config
    }

    fn from_default_paths() -> Self {
        let config_paths = ["config.json", "config/config.json"];

        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => {
                        log::info!("从 {} 加载配置成功", path);
                        return config;
                    }
                    Err(e) => {
                        log::warn!("加载配置文件 {} 失败: {}", path, e);
                    }
                }
            }
        }

        log::info!("使用默认配置");
        Self::default()
    }

    /// 用环境变量覆盖配置
    ///
    /// `TUSHARE_API_KEY` 优先于 `TUSHARE_TOKEN`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("API_KEY") {
            self.api.api_key = key;
        }
        if let Some(token) = non_empty("TUSHARE_API_KEY").or_else(|| non_empty("TUSHARE_TOKEN")) {
            self.tushare.api_key = token;
        }
        if let Some(dir) = non_empty("DATA_DIR") {
            self.data.dir = PathBuf::from(dir);
        }
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
