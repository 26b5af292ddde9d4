// source/mod.rs — 图片源模块入口
pub mod apod;

// 定义了图片源必须实现的通用 Trait：
// 先解析出当日最佳图片的绝对 URL，再按需下载到本地。

use crate::error::AppError;
use async_trait::async_trait; // 异步 Trait 支持宏
use std::path::Path;

/// 参与比较的候选图片
///
/// 只在选择阶段短暂存在：URL 加上一个可能探测失败的字节大小。
#[derive(Debug, Clone)]
pub struct ImageCandidate {
    /// 候选图片的绝对 URL
    pub url: String,
    /// 探测到的字节大小；None 表示探测失败，比较时按 0 处理
    pub size: Option<u64>,
}

/// 图片源的抽象 Trait
///
/// # 异步 Trait 说明
/// Rust 原生目前对 Trait 中的 async fn 支持有限，
/// 这里使用 `async_trait` 宏来支持异步接口。
#[async_trait]
pub trait ImageSource {
    /// 解析当日图片，返回应当下载的那一个绝对 URL
    async fn resolve_image_url(&self) -> Result<String, AppError>;

    /// 将 URL 指向的资源下载到 dest；dest 已存在时直接视为成功
    async fn download(&self, url: &str, dest: &Path) -> Result<(), AppError>;
}
