// config.rs — 配置管理模块
// 没有配置文件：所有配置在启动时从环境变量一次性解析，
// 之后作为不可变值传递，不存在可变的全局状态。

use crate::error::AppError;
use shellexpand::tilde; // 用于展开 ~ 和环境变量
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

/// 今日 APOD 条目所在的固定页面
pub const APOD_PAGE_URL: &str = "https://apod.nasa.gov/apod/astropix.html";

/// 页面内相对链接的拼接基准
pub const APOD_BASE_URL: &str = "https://apod.nasa.gov/apod/";

/// 应用全局配置项
pub struct AppConfig {
    /// 图片缓存目录（下载目标与存在性检查都发生在这里）
    pub cache_dir: PathBuf,
    /// APOD 页面地址
    pub page_url: String,
    /// 相对链接的基准地址
    pub base_url: String,
}

impl AppConfig {
    /// 初始化配置
    ///
    /// 缓存目录解析顺序：
    /// 1. $XDG_CACHE_HOME 非空时优先（支持 ~ 展开）
    /// 2. 否则使用 <home>/.cache
    pub fn new() -> Result<Self, AppError> {
        let xdg = env::var("XDG_CACHE_HOME").ok();
        let cache_dir = resolve_cache_dir(xdg.as_deref(), dirs::home_dir())?;

        Ok(Self {
            cache_dir,
            page_url: APOD_PAGE_URL.to_string(),
            base_url: APOD_BASE_URL.to_string(),
        })
    }

    /// 确保缓存目录存在
    pub fn ensure_dirs(&self) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }
}

/// 缓存目录解析的纯函数核心
///
/// 把环境读取和路径计算分开，方便单元测试直接传入参数。
fn resolve_cache_dir(
    xdg_override: Option<&str>,
    home: Option<PathBuf>,
) -> Result<PathBuf, AppError> {
    // 空字符串视同未设置
    if let Some(dir) = xdg_override
        && !dir.is_empty()
    {
        // tilde() 展开 ~ 和 $HOME 等变量
        return Ok(PathBuf::from(tilde(dir).into_owned()));
    }

    let home = home.ok_or_else(|| {
        AppError::Filesystem(io::Error::new(
            io::ErrorKind::NotFound,
            rust_i18n::t!("error_home").into_owned(),
        ))
    })?;

    Ok(home.join(".cache"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn override_wins_when_set() {
        let dir =
            resolve_cache_dir(Some("/tmp/apod-cache"), Some(PathBuf::from("/home/u"))).unwrap();
        assert_eq!(dir, Path::new("/tmp/apod-cache"));
    }

    #[test]
    fn empty_override_falls_back_to_home() {
        let dir = resolve_cache_dir(Some(""), Some(PathBuf::from("/home/u"))).unwrap();
        assert_eq!(dir, Path::new("/home/u/.cache"));
    }

    #[test]
    fn no_override_uses_home_cache() {
        let dir = resolve_cache_dir(None, Some(PathBuf::from("/home/u"))).unwrap();
        assert_eq!(dir, Path::new("/home/u/.cache"));
    }

    #[test]
    fn missing_home_is_an_error() {
        let err = resolve_cache_dir(None, None).unwrap_err();
        assert!(matches!(err, AppError::Filesystem(_)));
    }
}
