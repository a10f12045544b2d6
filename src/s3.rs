//! S3模块
//!
//! 该模块负责与 S3 兼容的对象存储交互：列举存储桶中的对象并推导公共 URL。

pub mod lister;
pub mod public_url;

// 重新导出常用的类型和函数
pub use lister::{MockStorageLister, S3Lister, StorageLister, StorageObject};
pub use public_url::public_url;
