// error.rs — 统一错误类型模块
// 使用 thiserror 派生宏为每类失败定义独立变体，
// 上层通过 `?` 逐层向 main 传播，main 打印后以非零码退出。

use thiserror::Error;

/// 整个程序的错误分类
///
/// # thiserror 说明
/// - `#[error("...")]` 定义 Display 输出格式
/// - `#[from]` 自动实现 From 转换，使 `?` 可以直接转换底层错误
#[derive(Debug, Error)]
pub enum AppError {
    /// 连接或传输层失败（DNS、TLS、超时等）
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 远端返回了失败状态码（>= 400）
    #[error("remote returned status {status} for {url}")]
    Remote { status: u16, url: String },

    /// 页面结构与预期不符
    #[error("parse error: {0}")]
    Parse(String),

    /// 文件系统操作失败（stat、创建、写入）
    #[error("filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    /// 外部壁纸工具启动失败或返回非零退出码
    #[error("wallpaper tool failed: {0}")]
    ExternalTool(String),
}
