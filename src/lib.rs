//! 存储桶图片画廊库
//!
//! 这是一个基于Axum的小型画廊服务，主要功能包括：
//! - 列举 S3 兼容存储桶中的全部对象
//! - 按后缀筛选图片并推导公共 URL
//! - 将图片渲染为 HTML 页面

pub mod config;
pub mod error;
pub mod handlers;
pub mod s3;
pub mod utils;

use axum::routing::get;
use config::Config;
use error::ConfigurationError;
use s3::{S3Lister, StorageLister};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// 应用状态
///
/// 启动时构建一次，之后只读，通过 `State` 注入到处理器。
#[derive(Clone)]
pub struct AppState {
    pub bucket_name: Option<Arc<str>>,
    pub lister: Option<Arc<dyn StorageLister>>,
    pub list_timeout: Duration,
}

impl AppState {
    pub fn new(
        bucket_name: Option<&str>,
        lister: Option<Arc<dyn StorageLister>>,
        list_timeout: Duration,
    ) -> Self {
        Self {
            bucket_name: bucket_name.map(Arc::from),
            lister,
            list_timeout,
        }
    }

    /// 根据配置初始化应用状态。
    ///
    /// 存储桶名称缺失或客户端初始化失败只记录错误，不会终止进程；
    /// 此时画廊端点对每个请求返回 500。
    pub async fn initialize(config: &Config) -> Self {
        Self::initialize_with(config, S3Lister::initialize(&config.storage)).await
    }

    /// 使用给定的客户端初始化过程构建应用状态。
    ///
    /// `init` 只在存储桶名称存在时才会被执行。
    pub async fn initialize_with<L, F>(config: &Config, init: F) -> Self
    where
        L: StorageLister + 'static,
        F: Future<Output = Result<L, ConfigurationError>>,
    {
        let Some(bucket_name) = config.bucket_name.as_deref() else {
            error!("S3_BUCKET environment variable not set.");
            return Self::new(None, None, config.list_timeout);
        };

        let lister: Option<Arc<dyn StorageLister>> = match init.await {
            Ok(lister) => {
                info!(
                    "Successfully initialized storage client for bucket: {}",
                    bucket_name
                );
                Some(Arc::new(lister))
            }
            Err(e) => {
                error!("Failed to initialize storage client: {}", e);
                None
            }
        };

        Self::new(Some(bucket_name), lister, config.list_timeout)
    }
}

/// 创建并配置Axum应用程序
///
/// # 参数
///
/// * `state` - 应用状态。
///
/// # Returns
///
/// 返回配置好的Axum Router实例，只有 `GET /` 一个路由
pub fn app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/", get(handlers::handle_gallery))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
