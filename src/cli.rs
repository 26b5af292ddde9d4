// cli.rs — 命令行接口定义模块
// 使用 clap 的 derive 模式定义子命令和参数

use clap::{Parser, Subcommand}; // Parser: 解析命令行参数的 trait; Subcommand: 定义子命令的 trait
use clap_complete::Shell; // Shell 枚举：Bash, Zsh, Fish, Elvish, PowerShell

/// 每日天文壁纸工具
///
/// 抓取 NASA 的 Astronomy Picture of the Day 页面，
/// 在缩略图与原图之间选出更大的一张，下载后设置为桌面壁纸。
/// 不带子命令直接运行即执行完整流程。
#[derive(Parser)]
#[command(name = "apodwall")]
#[command(version)] // 自动从 Cargo.toml 读取 version 字段
#[command(about = "每日天文壁纸工具 — 抓取 APOD 页面，下载当日图片并设置为壁纸")]
pub struct Cli {
    /// 不指定子命令时执行默认流程：抓取 + 下载 + 设置壁纸
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 只抓取并下载今日图片，不设置壁纸
    ///
    /// 用法示例:
    ///   apodwall fetch
    Fetch,

    /// 将本地指定的图片设置为系统壁纸
    ///
    /// 用法示例:
    ///   apodwall apply image.jpg
    Apply {
        /// 图片的本地路径
        image: String,
    },

    /// 查看当前解析出的配置（缓存目录、页面地址等）
    ///
    /// 用法示例:
    ///   apodwall config
    Config,

    /// 生成 shell 补全脚本（支持 bash, zsh, fish, elvish, powershell）
    ///
    /// 用法示例：
    ///   apodwall completions zsh > ~/.zsh/completions/_apodwall
    ///   apodwall completions fish > ~/.config/fish/completions/apodwall.fish
    Completions {
        /// 目标 shell 类型
        shell: Shell,
    },
}
