// main.rs — 程序入口
// 负责初始化异步运行时、解析命令行参数、分发子命令

mod cli; // 声明 cli 模块，对应 src/cli.rs
mod config; // 声明 config 模块，对应 src/config.rs
mod error;
mod fetcher;
mod flow;
mod setter;
mod source;

// 初始化多语言支持，嵌入 locales 目录下的所有翻译
rust_i18n::i18n!("locales");

use clap::{CommandFactory, Parser}; // 引入 Parser trait 的 parse() 方法; CommandFactory 用于生成补全脚本
use clap_complete::generate; // 引入补全脚本生成函数
use cli::{Cli, Commands}; // 引入 CLI 结构体和子命令枚举
use config::AppConfig; // 引入应用配置
use error::{Result, WallsetError};
use fetcher::Fetcher;
use flow::Outcome;
use rust_i18n::t; // 引入翻译宏
use setter::DesktopApplier;
use source::{Choice, ImageSource};
use std::time::Duration;

/// `#[tokio::main]` 宏将 async main 转换为同步 main + tokio 运行时
#[tokio::main]
async fn main() {
    // 自动检测系统语言并设置
    let locale = std::env::var("LANG").unwrap_or_else(|_| "en".to_string());
    if locale.starts_with("zh") {
        rust_i18n::set_locale("zh-CN");
    } else {
        rust_i18n::set_locale("en");
    }

    // 解析命令行参数
    let cli = Cli::parse();

    // 除无效选择外，所有错误打印后进程正常结束，退出码不区分错误种类
    match run(cli).await {
        Ok(()) => {}
        Err(WallsetError::InvalidChoice(_)) => {
            println!("{}", t!("error_invalid_choice"));
            std::process::exit(1);
        }
        Err(WallsetError::Cancelled) => {
            println!("{}", t!("cancelled"));
        }
        Err(WallsetError::MissingFile(path)) => {
            println!("{}", t!("error_missing_file", path => path.display()));
        }
        Err(WallsetError::Network(e)) => {
            println!("{}", t!("error_network", detail => e));
            println!("{}", t!("network_hint"));
        }
        Err(WallsetError::Config(msg)) => {
            println!("{msg}");
        }
        // 兜底：打印诊断信息
        Err(e) => {
            println!("{}", t!("error_occurred", detail => e));
        }
    }
}

/// 根据子命令分发执行逻辑，不带子命令时进入交互模式
async fn run(cli: Cli) -> Result<()> {
    // 创建应用配置（读取环境变量与配置文件）
    let mut config = AppConfig::new();

    match cli.command {
        None => handle_interactive(&config).await,

        Some(Commands::Local { image }) => handle_local(&config, &image).await,

        Some(Commands::Web { url, keep }) => handle_web(&config, &url, keep).await,

        Some(Commands::Completions { shell }) => {
            generate(
                shell,
                &mut Cli::command(),
                "wallset",
                &mut std::io::stdout(),
            );
            Ok(())
        }

        Some(Commands::Config { action }) => handle_config(&mut config, &action),
    }
}

/// 交互模式：提示选择来源，收集路径或 URL 后执行完整流程
///
/// 首个提示符接受三种输入：local、web，或直接粘贴的 http(s) URL
/// （自动识别为 web 选择）
async fn handle_interactive(config: &AppConfig) -> Result<()> {
    println!("{}", t!("processing"));

    let raw = prompt(t!("prompt_choice"))?;
    let source = match source::parse_choice(&raw)? {
        Choice::Local => {
            println!("{}", t!("chose", kind => "local"));
            let path = prompt(t!("prompt_path"))?;
            ImageSource::Local(config::expand_path(&path))
        }
        Choice::Web => {
            println!("{}", t!("chose", kind => "web"));
            let url = prompt(t!("prompt_url"))?;
            ImageSource::Web(url)
        }
        Choice::Direct(url) => {
            println!("{}", t!("detected_url", url => url));
            println!("{}", t!("chose", kind => "web"));
            ImageSource::Web(url)
        }
    };

    println!("{}", t!("source_info", kind => source.kind()));

    feedback_delay().await?;

    run_flow(source, config.keep_downloads, config).await?;
    Ok(())
}

/// 处理 local 子命令：将本地图片设置为壁纸
async fn handle_local(config: &AppConfig, image: &str) -> Result<()> {
    let path = config::expand_path(image);
    run_flow(ImageSource::Local(path), config.keep_downloads, config).await?;
    Ok(())
}

/// 处理 web 子命令：下载图片并设置为壁纸
async fn handle_web(config: &AppConfig, url: &str, keep: bool) -> Result<()> {
    run_flow(
        ImageSource::Web(url.to_string()),
        keep || config.keep_downloads,
        config,
    )
    .await?;
    Ok(())
}

/// 执行流程，期间监听 Ctrl-C：下载等待中也能干净退出
async fn run_flow(source: ImageSource, keep: bool, config: &AppConfig) -> Result<Outcome> {
    // 到这里输入已校验通过，才允许产生文件系统副作用
    config.ensure_dirs()?;

    let fetcher = Fetcher::new(config.timeout())?;
    let applier = DesktopApplier;

    tokio::select! {
        outcome = flow::run(source, keep, config, &fetcher, &applier) => outcome,
        _ = tokio::signal::ctrl_c() => Err(WallsetError::Cancelled),
    }
}

/// 收集完输入后的短暂反馈延迟，纯用户体验，可被 Ctrl-C 干净打断
async fn feedback_delay() -> Result<()> {
    println!("{}", t!("processing_wait"));

    tokio::select! {
        _ = tokio::time::sleep(Duration::from_millis(1500)) => {}
        _ = tokio::signal::ctrl_c() => return Err(WallsetError::Cancelled),
    }

    println!("{}", t!("processing_done"));
    Ok(())
}

/// 读取一行用户输入并去除首尾空白；Ctrl-C 映射为 Cancelled
fn prompt(text: impl Into<String>) -> Result<String> {
    let input: String = dialoguer::Input::new()
        .with_prompt(text)
        .interact_text()
        .map_err(|e| match e {
            dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
                WallsetError::Cancelled
            }
            dialoguer::Error::IO(io) => WallsetError::Io(io),
        })?;
    Ok(input.trim().to_string())
}

/// 处理 config 子命令：查看或修改配置
fn handle_config(config: &mut AppConfig, action: &cli::ConfigAction) -> Result<()> {
    match action {
        cli::ConfigAction::Show => {
            println!("{}", t!("config_title"));
            println!(
                "{}",
                t!("config_path", path => config.config_path.display())
            );
            match &config.download_dir {
                Some(dir) => {
                    println!("{}", t!("config_download_dir", path => dir.display()))
                }
                None => println!("{}", t!("config_download_dir_cwd")),
            }
            println!("{}", t!("config_timeout", secs => config.timeout_secs));
            println!("{}", t!("config_keep", keep => config.keep_downloads));
        }
        cli::ConfigAction::Schema => {
            println!("{}", AppConfig::get_schema());
        }
        cli::ConfigAction::Dump => {
            println!("{}", config.to_toml());
        }
        cli::ConfigAction::Set { key, value } => {
            match key.as_str() {
                "download_dir" | "dir" => {
                    config.download_dir = Some(config::expand_path(value));
                }
                "timeout" | "timeout_secs" => {
                    config.timeout_secs = value.parse().map_err(|_| {
                        WallsetError::Config(
                            t!("config_error_bad_number", value => value).to_string(),
                        )
                    })?;
                }
                "keep" | "keep_downloads" => {
                    config.keep_downloads = value.parse().map_err(|_| {
                        WallsetError::Config(
                            t!("config_error_bad_bool", value => value).to_string(),
                        )
                    })?;
                }
                _ => {
                    return Err(WallsetError::Config(
                        t!("config_error_unknown_key", key => key).to_string(),
                    ));
                }
            }
            config.ensure_dirs()?;
            config.save()?;
            println!("{}", t!("config_updated", key => key, value => value));
        }
    }
    Ok(())
}
