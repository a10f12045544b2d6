use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// 对象名称中不需要转义的字符：未保留字符加上路径分隔符 `/`
const OBJECT_NAME_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// 推导对象的公共 URL。
///
/// 格式为 `{base}/{bucket}/{name}`，对象名称按 UTF-8 百分号编码。
/// 只有对象被设置为公开可读时该 URL 才能访问。
///
/// # 参数
///
/// * `base_url` - 公共访问前缀，例如 `https://storage.googleapis.com`。
/// * `bucket_name` - 存储桶名称。
/// * `object_name` - 对象名称。
///
/// # 示例
///
/// ```
/// use bucket_gallery::s3::public_url;
///
/// assert_eq!(
///     public_url("https://storage.googleapis.com", "photos", "2024/a b.png"),
///     "https://storage.googleapis.com/photos/2024/a%20b.png"
/// );
/// ```
pub fn public_url(base_url: &str, bucket_name: &str, object_name: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        bucket_name,
        utf8_percent_encode(object_name, OBJECT_NAME_SAFE)
    )
}
