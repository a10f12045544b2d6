use axum::http::StatusCode;
use axum_test::TestServer;
use bucket_gallery::error::ListingError;
use bucket_gallery::s3::{MockStorageLister, StorageLister, StorageObject};
use bucket_gallery::{AppState, app};
use mockall::predicate::eq;
use std::sync::Arc;
use std::time::Duration;

const BUCKET: &str = "nova-staging-bucket";

fn object(name: &str) -> StorageObject {
    StorageObject {
        name: name.to_string(),
        public_url: format!("https://storage.googleapis.com/{BUCKET}/{name}"),
    }
}

fn server_with(lister: MockStorageLister) -> TestServer {
    let lister: Arc<dyn StorageLister> = Arc::new(lister);
    let state = AppState::new(Some(BUCKET), Some(lister), Duration::from_secs(5));
    TestServer::new(app(state)).unwrap()
}

/// 集成测试：混合对象只渲染图片
///
/// 验证只保留图片后缀的对象，按列举顺序，不区分大小写
#[tokio::test]
async fn test_mixed_bucket_renders_only_images() {
    let mut lister = MockStorageLister::new();
    lister
        .expect_list_objects()
        .with(eq(BUCKET))
        .times(1)
        .returning(|_| {
            Ok(vec![
                object("a.png"),
                object("b.txt"),
                object("C.JPG"),
                object("d.bmp"),
            ])
        });
    let server = server_with(lister);

    let response = server.get("/").await;
    response.assert_status_ok();

    let body = response.text();
    let a = body.find("a.png").expect("a.png rendered");
    let c = body.find("C.JPG").expect("C.JPG rendered");
    assert!(a < c);
    assert_eq!(body.matches("<img ").count(), 2);
    assert!(!body.contains("b.txt"));
    assert!(!body.contains("d.bmp"));
    assert!(body.contains(BUCKET));
}

/// 集成测试：空存储桶
///
/// 验证没有对象时返回 200 和提示信息
#[tokio::test]
async fn test_empty_bucket_shows_no_images_message() {
    let mut lister = MockStorageLister::new();
    lister.expect_list_objects().returning(|_| Ok(Vec::new()));
    let server = server_with(lister);

    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("No images found"));
}

/// 集成测试：没有图片的存储桶
#[tokio::test]
async fn test_bucket_without_images_shows_no_images_message() {
    let mut lister = MockStorageLister::new();
    lister
        .expect_list_objects()
        .returning(|_| Ok(vec![object("notes.txt"), object("archive.zip")]));
    let server = server_with(lister);

    let response = server.get("/").await;
    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("No images found"));
    assert!(!body.contains("<img "));
}

/// 集成测试：未配置存储桶名称
///
/// 验证每个请求都返回 500，且不会调用列举
#[tokio::test]
async fn test_missing_bucket_returns_500_without_listing() {
    let mut lister = MockStorageLister::new();
    lister.expect_list_objects().never();
    let lister: Arc<dyn StorageLister> = Arc::new(lister);
    let state = AppState::new(None, Some(lister), Duration::from_secs(5));
    let server = TestServer::new(app(state)).unwrap();

    for _ in 0..2 {
        let response = server.get("/").expect_failure().await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.text().contains("bucket name missing"));
    }
}

/// 集成测试：客户端初始化失败
#[tokio::test]
async fn test_missing_client_returns_500() {
    let state = AppState::new(Some(BUCKET), None, Duration::from_secs(5));
    let server = TestServer::new(app(state)).unwrap();

    let response = server.get("/").expect_failure().await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.text().contains("storage client not initialized"));
}

/// 集成测试：列举失败
///
/// 验证返回 500，响应包含底层错误，不渲染任何图片
#[tokio::test]
async fn test_listing_error_returns_500_with_cause() {
    let mut lister = MockStorageLister::new();
    lister
        .expect_list_objects()
        .returning(|bucket| Err(ListingError::NoSuchBucket(bucket.to_string())));
    let server = server_with(lister);

    let response = server.get("/").expect_failure().await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text();
    assert!(body.contains("Error accessing storage bucket"));
    assert!(body.contains(&format!("bucket '{BUCKET}' does not exist")));
    assert!(!body.contains("<img "));
}

/// 集成测试：列举超时
///
/// 验证超时返回 500 而不是部分结果
#[tokio::test]
async fn test_listing_timeout_returns_500() {
    struct SlowLister;

    #[async_trait::async_trait]
    impl StorageLister for SlowLister {
        async fn list_objects(
            &self,
            _bucket_name: &str,
        ) -> Result<Vec<StorageObject>, ListingError> {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(vec![object("late.png")])
        }
    }

    let lister: Arc<dyn StorageLister> = Arc::new(SlowLister);
    let state = AppState::new(Some(BUCKET), Some(lister), Duration::from_millis(50));
    let server = TestServer::new(app(state)).unwrap();

    let response = server.get("/").expect_failure().await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text();
    assert!(body.contains("did not complete"));
    assert!(!body.contains("late.png"));
}

/// 集成测试：重复请求结果一致
#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let mut lister = MockStorageLister::new();
    lister
        .expect_list_objects()
        .times(2)
        .returning(|_| Ok(vec![object("x.webp"), object("y.txt"), object("z.GIF")]));
    let server = server_with(lister);

    let first = server.get("/").await.text();
    let second = server.get("/").await.text();
    assert_eq!(first, second);
    assert_eq!(first.matches("<img ").count(), 2);
}

/// 集成测试：只有 GET / 一个路由
#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let mut lister = MockStorageLister::new();
    lister.expect_list_objects().never();
    let server = server_with(lister);

    let response = server.get("/images").expect_failure().await;
    response.assert_status(StatusCode::NOT_FOUND);
}
