use crate::handlers::constants::IMAGE_SUFFIXES;

/// 判断对象名称是否以图片后缀结尾（不区分大小写）
///
/// 只做后缀匹配，不解析扩展名，因此 `.png` 这样的名称同样视为图片。
///
/// # 示例
///
/// ```
/// use bucket_gallery::utils::path::has_image_suffix;
///
/// assert!(has_image_suffix("a.png"));
/// assert!(has_image_suffix("photos/C.JPG"));
/// assert!(!has_image_suffix("b.txt"));
/// assert!(!has_image_suffix("d.bmp"));
/// ```
pub fn has_image_suffix(name: &str) -> bool {
    let lower = name.to_lowercase();
    IMAGE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}
