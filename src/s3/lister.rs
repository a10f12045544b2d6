//! 存储桶列举模块
//!
//! 定义列举存储桶对象的接口，以及基于 `aws_sdk_s3` 的实现。

use crate::config::StorageConfig;
use crate::error::{ConfigurationError, ListingError};
use crate::s3::public_url::public_url;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::ProvideCredentials;
use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error;
use mockall::automock;
use std::sync::Arc;

/// 存储桶中的一个对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageObject {
    /// 对象名称（S3 键）
    pub name: String,
    /// 对象的公共 URL
    pub public_url: String,
}

/// 列举存储桶对象的接口。
#[automock]
#[async_trait]
pub trait StorageLister: Send + Sync {
    /// 列举存储桶中的全部对象，按存储服务返回的顺序。
    ///
    /// # 参数
    ///
    /// * `bucket_name` - 存储桶名称。
    ///
    /// # 返回值
    ///
    /// 完整的对象列表；任何一页失败都返回错误，不返回部分结果。
    async fn list_objects(&self, bucket_name: &str) -> Result<Vec<StorageObject>, ListingError>;
}

/// 基于 S3 兼容 API 的列举实现
#[derive(Clone)]
pub struct S3Lister {
    client: Arc<Client>,
    public_base_url: String,
}

impl S3Lister {
    pub fn new(client: Arc<Client>, public_base_url: impl Into<String>) -> Self {
        Self {
            client,
            public_base_url: public_base_url.into(),
        }
    }

    /// 使用标准 AWS 环境变量初始化 S3 客户端。
    ///
    /// 凭据和区域通过 `aws_config` 的默认提供链解析，端点和寻址方式来自 `config`。
    ///
    /// # Errors
    ///
    /// 见 [`S3Lister::from_sdk_config`]。
    pub async fn initialize(config: &StorageConfig) -> Result<Self, ConfigurationError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;
        Self::from_sdk_config(&sdk_config, config).await
    }

    /// 从已加载的 SDK 配置创建列举器。
    ///
    /// 启动时立即解析一次凭据，使缺失的凭据在启动阶段暴露，而不是在每个请求中。
    /// 不启用重试。
    ///
    /// # Errors
    ///
    /// 没有区域、没有凭据提供者或凭据解析失败时返回 [`ConfigurationError::ClientInit`]。
    pub async fn from_sdk_config(
        sdk_config: &SdkConfig,
        config: &StorageConfig,
    ) -> Result<Self, ConfigurationError> {
        if sdk_config.region().is_none() {
            return Err(ConfigurationError::ClientInit(
                "no region configured (set AWS_REGION)".to_string(),
            ));
        }
        let Some(credentials_provider) = sdk_config.credentials_provider() else {
            return Err(ConfigurationError::ClientInit(
                "no credentials provider configured".to_string(),
            ));
        };
        credentials_provider
            .provide_credentials()
            .await
            .map_err(|e| {
                ConfigurationError::ClientInit(format!(
                    "failed to resolve credentials: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
            .force_path_style(config.force_path_style)
            .retry_config(RetryConfig::disabled())
            .build();

        Ok(Self::new(
            Arc::new(Client::from_conf(s3_config)),
            config.public_base_url.clone(),
        ))
    }
}

#[async_trait]
impl StorageLister for S3Lister {
    async fn list_objects(&self, bucket_name: &str) -> Result<Vec<StorageObject>, ListingError> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(bucket_name)
            .into_paginator()
            .send();

        let mut objects = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| classify_list_error(bucket_name, e))?;
            for object in page.contents() {
                // 没有键的条目无法生成 URL
                let Some(key) = object.key() else {
                    continue;
                };
                objects.push(StorageObject {
                    name: key.to_string(),
                    public_url: public_url(&self.public_base_url, bucket_name, key),
                });
            }
        }

        Ok(objects)
    }
}

/// 将 SDK 错误归类为 [`ListingError`]。
fn classify_list_error(bucket_name: &str, err: SdkError<ListObjectsV2Error>) -> ListingError {
    if let Some(service_err) = err.as_service_error() {
        if service_err.is_no_such_bucket() || service_err.code() == Some("NoSuchBucket") {
            return ListingError::NoSuchBucket(bucket_name.to_string());
        }
        if service_err.code() == Some("AccessDenied") {
            return ListingError::AccessDenied(
                service_err
                    .message()
                    .unwrap_or("permission denied")
                    .to_string(),
            );
        }
    }
    ListingError::Service(DisplayErrorContext(&err).to_string())
}
