//! 画廊服务的配置模块。
//!
//! 该模块负责在启动时从环境变量加载配置，加载后只读。

use std::env;
use std::time::Duration;
use tracing::warn;

/// 公共 URL 的默认前缀（GCS 的 S3 兼容公共访问地址）
pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://storage.googleapis.com";

/// 默认监听地址
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// 列举操作的默认超时时间（秒）
pub const DEFAULT_LIST_TIMEOUT_SECS: u64 = 30;

/// 存储客户端相关配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// S3 兼容服务的端点，未设置时使用 SDK 默认端点
    pub endpoint: Option<String>,
    /// 是否使用 path-style 寻址
    pub force_path_style: bool,
    /// 生成公共 URL 时使用的前缀，默认取 `endpoint`，两者都未设置时为 GCS
    pub public_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            force_path_style: false,
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
        }
    }
}

/// 进程级配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 存储桶名称，缺失时端点只会返回 500
    pub bucket_name: Option<String>,
    pub storage: StorageConfig,
    pub list_timeout: Duration,
    pub listen_addr: String,
}

impl Config {
    /// 从进程环境变量加载配置。
    ///
    /// # 环境变量
    ///
    /// * `S3_BUCKET` - 存储桶名称
    /// * `S3_ENDPOINT` - S3 兼容服务的端点
    /// * `S3_FORCE_PATH_STYLE` - 是否使用 path-style 寻址
    /// * `S3_PUBLIC_BASE_URL` - 公共 URL 前缀
    /// * `LIST_TIMEOUT_SECS` - 列举超时时间（秒）
    /// * `LISTEN_ADDR` - 监听地址
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 使用给定的查找函数加载配置，空字符串视为未设置。
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let force_path_style = get("S3_FORCE_PATH_STYLE")
            .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let list_timeout_secs = match get("LIST_TIMEOUT_SECS") {
            None => DEFAULT_LIST_TIMEOUT_SECS,
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(
                        "Invalid LIST_TIMEOUT_SECS '{}', using {}s",
                        raw, DEFAULT_LIST_TIMEOUT_SECS
                    );
                    DEFAULT_LIST_TIMEOUT_SECS
                }
            },
        };

        // 公共 URL 前缀未设置时跟随列举使用的端点
        let endpoint = get("S3_ENDPOINT");
        let public_base_url = get("S3_PUBLIC_BASE_URL")
            .or_else(|| endpoint.clone())
            .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string());

        Self {
            bucket_name: get("S3_BUCKET"),
            storage: StorageConfig {
                endpoint,
                force_path_style,
                public_base_url,
            },
            list_timeout: Duration::from_secs(list_timeout_secs),
            listen_addr: get("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
        }
    }
}
