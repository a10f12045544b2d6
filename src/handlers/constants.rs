/// 视为图片的对象名称后缀（小写）
pub const IMAGE_SUFFIXES: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp"];

/// 页面标题
pub const PAGE_TITLE: &str = "Storage Image Viewer";

/// 图片的替代文本
pub const IMAGE_ALT: &str = "Image from bucket";

/// 没有找到图片时的提示
pub const NO_IMAGES_MESSAGE: &str = "No images found in the bucket or unable to list images.";

/// 没有找到图片时的配置说明
pub const NO_IMAGES_HINT: &str = "Ensure the bucket exists, contains images \
(.png, .jpg, .jpeg, .gif, .webp), and that the objects are publicly readable.";

/// 页面样式
pub const PAGE_STYLE: &str = "\
body { font-family: sans-serif; margin: 20px; }
h1 { color: #333; }
.image-gallery { display: flex; flex-wrap: wrap; gap: 15px; margin-top: 20px; }
.image-gallery img { max-width: 200px; height: auto; border: 1px solid #ccc; padding: 5px; }
.error { color: red; font-weight: bold; }
";
