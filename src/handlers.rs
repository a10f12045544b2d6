//! HTTP请求处理模块
//!
//! 此模块包含画廊页面的处理器和页面使用的常量。

pub mod constants;
pub mod gallery;

// 重新导出主要的公共接口
pub use gallery::handle_gallery;
