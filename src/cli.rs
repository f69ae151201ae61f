// cli.rs — 命令行接口定义模块
// 使用 clap 的 derive 模式定义所有子命令和参数

use clap::{Parser, Subcommand}; // Parser: 解析命令行参数的 trait; Subcommand: 定义子命令的 trait
use clap_complete::Shell; // Shell 枚举：Bash, Zsh, Fish, Elvish, PowerShell

/// 桌面壁纸设置工具
///
/// 使用本地图片或网络直链图片更换桌面背景。
/// 不带子命令运行时进入交互模式，按提示选择来源。
#[derive(Parser)]
#[command(name = "wallset")]
#[command(version)] // 自动从 Cargo.toml 读取 version 字段
#[command(about = "桌面壁纸设置工具 — 使用本地图片或网络图片一键更换桌面背景")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 将本地图片设置为桌面壁纸
    ///
    /// 用法示例:
    ///   wallset local ~/Pictures/bg.jpg
    Local {
        /// 图片的本地路径
        image: String,
    },

    /// 下载网络图片并设置为桌面壁纸
    ///
    /// 设置成功后下载文件默认会被删除，
    /// 设置失败时文件保留在下载目录中供排查。
    ///
    /// 用法示例:
    ///   wallset web https://example.com/pic.png
    ///   wallset web https://example.com/pic.png --keep
    Web {
        /// 图片的直链 URL
        url: String,

        /// 设置成功后保留下载的图片文件
        #[arg(short, long)]
        keep: bool,
    },

    /// 生成 shell 补全脚本（支持 bash, zsh, fish, elvish, powershell）
    ///
    /// 用法示例：
    ///   wallset completions zsh > ~/.zsh/completions/_wallset
    ///   wallset completions fish > ~/.config/fish/completions/wallset.fish
    Completions {
        /// 目标 shell 类型
        shell: Shell,
    },

    /// 配置管理操作
    ///
    /// 用法示例:
    ///   wallset config show
    ///   wallset config dump
    ///   wallset config set download_dir ~/Pictures
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// 配置管理操作
#[derive(Subcommand)]
pub enum ConfigAction {
    /// 查看当前所有配置简报
    Show,
    /// 生成配置文件对应的 JSON Schema
    Schema,
    /// 以 TOML 格式打印当前完整配置内容
    Dump,
    /// 设置配置项的值 (支持: download_dir, timeout, keep)
    Set {
        /// 要设置的键 (download_dir, timeout, keep)
        key: String,
        /// 要设置的值
        value: String,
    },
}
