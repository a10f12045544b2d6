use crate::AppState;
use crate::error::{ConfigurationError, GalleryError, ListingError};
use crate::handlers::constants::{
    IMAGE_ALT, NO_IMAGES_HINT, NO_IMAGES_MESSAGE, PAGE_STYLE, PAGE_TITLE,
};
use crate::s3::StorageObject;
use crate::utils::path::has_image_suffix;
use axum::extract::State;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use tracing::{error, info};

/// 处理画廊页面请求。
///
/// 列举配置的存储桶，保留图片对象的公共 URL 并渲染为 HTML 页面。
///
/// # 参数
///
/// * `State(state)` - 启动时构建的应用状态。
///
/// # 返回值
///
/// 成功时返回渲染好的页面（没有图片时同样返回 200）。
///
/// # Errors
///
/// 配置缺失或列举失败时返回 [`GalleryError`]，响应为 500。
pub async fn handle_gallery(State(state): State<AppState>) -> Result<Markup, GalleryError> {
    let (bucket_name, lister) = match (state.bucket_name.as_deref(), state.lister.as_ref()) {
        (Some(bucket_name), Some(lister)) => (bucket_name, lister),
        (None, _) => return Err(config_failure(ConfigurationError::MissingBucket)),
        (Some(_), None) => return Err(config_failure(ConfigurationError::ClientUnavailable)),
    };

    // 列举对象，超时视为失败，不渲染部分结果
    let listed = tokio::time::timeout(state.list_timeout, lister.list_objects(bucket_name))
        .await
        .map_err(|_| ListingError::TimedOut(state.list_timeout))
        .and_then(|result| result);

    let objects = match listed {
        Ok(objects) => objects,
        Err(e) => {
            error!("Error listing objects in bucket '{}': {}", bucket_name, e);
            return Err(e.into());
        }
    };

    let image_urls = filter_image_urls(objects);
    Ok(render_gallery(bucket_name, &image_urls))
}

fn config_failure(err: ConfigurationError) -> GalleryError {
    error!("Gallery unavailable: {}", err);
    err.into()
}

/// 按列举顺序保留图片对象的公共 URL。
pub fn filter_image_urls(objects: Vec<StorageObject>) -> Vec<String> {
    objects
        .into_iter()
        .filter(|object| has_image_suffix(&object.name))
        .map(|object| {
            info!("Found image: {}, URL: {}", object.name, object.public_url);
            object.public_url
        })
        .collect()
}

/// 渲染画廊页面。
///
/// 所有插值都会被 HTML 转义。`image_urls` 为空时显示固定的提示信息。
pub fn render_gallery(bucket_name: &str, image_urls: &[String]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (PAGE_TITLE) }
                style { (PreEscaped(PAGE_STYLE)) }
            }
            body {
                h1 { "Images from Bucket: " (bucket_name) }
                @if image_urls.is_empty() {
                    p { (NO_IMAGES_MESSAGE) }
                    p class="error" { (NO_IMAGES_HINT) }
                } @else {
                    div class="image-gallery" {
                        @for url in image_urls {
                            img src=(url) alt=(IMAGE_ALT);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(name: &str) -> StorageObject {
        StorageObject {
            name: name.to_string(),
            public_url: format!("https://storage.googleapis.com/bucket/{name}"),
        }
    }

    #[test]
    fn test_filter_keeps_images_in_order() {
        let objects = vec![object("a.png"), object("b.txt"), object("C.JPG"), object("d.bmp")];
        assert_eq!(
            filter_image_urls(objects),
            vec![
                "https://storage.googleapis.com/bucket/a.png".to_string(),
                "https://storage.googleapis.com/bucket/C.JPG".to_string(),
            ]
        );
    }

    #[test]
    fn test_filter_empty_listing() {
        assert!(filter_image_urls(Vec::new()).is_empty());
    }

    #[test]
    fn test_render_lists_each_url() {
        let urls = vec![
            "https://example.com/b/1.png".to_string(),
            "https://example.com/b/2.gif".to_string(),
        ];
        let page = render_gallery("b", &urls).into_string();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("Images from Bucket: b"));
        assert_eq!(page.matches("<img ").count(), 2);
        assert!(page.contains(r#"src="https://example.com/b/1.png""#));
        assert!(!page.contains(NO_IMAGES_MESSAGE));
    }

    #[test]
    fn test_render_empty_shows_message() {
        let page = render_gallery("b", &[]).into_string();
        assert!(page.contains(NO_IMAGES_MESSAGE));
        assert!(!page.contains("<img "));
    }

    #[test]
    fn test_render_escapes_bucket_and_urls() {
        let urls = vec![r#"https://example.com/"><script>.png"#.to_string()];
        let page = render_gallery("<b>", &urls).into_string();
        assert!(page.contains("Images from Bucket: &lt;b&gt;"));
        assert!(!page.contains("<script>"));
    }
}
