// main.rs — 程序入口
// 负责初始化异步运行时、解析命令行参数、分发子命令

mod cli; // 声明 cli 模块，对应 src/cli.rs
mod config; // 声明 config 模块，对应 src/config.rs
mod error;
mod setter;
mod source;

// 初始化多语言支持，嵌入 locales 目录下的所有翻译
rust_i18n::i18n!("locales");

use clap::{CommandFactory, Parser}; // 引入 Parser trait 的 parse() 方法; CommandFactory 用于生成补全脚本
use clap_complete::generate; // 引入补全脚本生成函数
use cli::{Cli, Commands}; // 引入 CLI 结构体和子命令枚举
use config::AppConfig; // 引入应用配置
use rust_i18n::t; // 引入翻译宏
use setter::{CommandSetter, WallpaperSetter};
use source::ImageSource;
use source::apod::{self, ApodClient};
use std::path::{Path, PathBuf};

/// `#[tokio::main]` 宏将 async main 转换为同步 main + tokio 运行时
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 自动检测系统语言并设置
    let locale = std::env::var("LANG").unwrap_or_else(|_| "en".to_string());
    if locale.starts_with("zh") {
        rust_i18n::set_locale("zh-CN");
    } else {
        rust_i18n::set_locale("en");
    }

    // 解析命令行参数
    let cli = Cli::parse();

    // 创建应用配置（一次性读取环境变量、解析缓存目录）
    let config = AppConfig::new()?;

    // 根据子命令分发执行逻辑；不带子命令即执行完整流程
    match &cli.command {
        None => {
            let image_path = handle_fetch(&config).await?;

            println!("{}", t!("setting_wallpaper"));
            CommandSetter::feh().apply(&image_path)?;
            println!("{}", t!("set_done"));
        }

        Some(Commands::Fetch) => {
            let image_path = handle_fetch(&config).await?;
            println!("{}", t!("fetch_done", path => image_path.display()));
        }

        Some(Commands::Apply { image }) => {
            println!("{}", t!("setting_wallpaper"));
            CommandSetter::feh().apply(Path::new(image))?;
            println!("{}", t!("set_done"));
        }

        Some(Commands::Config) => {
            handle_config(&config);
        }

        Some(Commands::Completions { shell }) => {
            generate(
                *shell,
                &mut Cli::command(),
                "apodwall",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// 解析今日图片并下载到缓存目录，返回本地路径
async fn handle_fetch(config: &AppConfig) -> Result<PathBuf, Box<dyn std::error::Error>> {
    // 确保缓存目录存在
    config.ensure_dirs()?;

    let client = ApodClient::new(config)?;
    let url = client.resolve_image_url().await?;

    // 文件名取 URL 的最后一个路径段
    let dest = config.cache_dir.join(apod::artifact_filename(&url));

    client.download(&url, &dest).await?;
    Ok(dest)
}

/// 打印启动时解析出的配置
fn handle_config(config: &AppConfig) {
    println!("{}", t!("config_title"));
    println!("{}", t!("config_cache_dir", path => config.cache_dir.display()));
    println!("{}", t!("config_page_url", url => config.page_url));
    println!("{}", t!("config_tool", tool => CommandSetter::feh().describe()));
}
