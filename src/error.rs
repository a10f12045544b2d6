//! 错误类型模块
//!
//! 画廊端点的所有失败都归为两类：启动时发现的配置错误，以及请求时的列举错误。
//! 两者在 HTTP 层面都映射为 500 响应。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::time::Duration;
use thiserror::Error;

/// 配置错误：存储桶名称缺失或存储客户端初始化失败。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("bucket name missing (set S3_BUCKET)")]
    MissingBucket,

    #[error("storage client failed to initialize: {0}")]
    ClientInit(String),

    #[error("storage client not initialized")]
    ClientUnavailable,
}

/// 列举存储桶对象时的错误。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListingError {
    #[error("bucket '{0}' does not exist")]
    NoSuchBucket(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("{0}")]
    Service(String),

    #[error("listing did not complete within {0:?}")]
    TimedOut(Duration),
}

/// 画廊请求的错误。
#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("Storage client not initialized or bucket name missing: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Error accessing storage bucket: {0}")]
    Listing(#[from] ListingError),
}

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
