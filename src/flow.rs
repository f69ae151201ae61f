// flow.rs — 流程编排模块
// 串联 取得路径 → 校验存在 → 设置壁纸 → 按策略清理 四个阶段，
// 任一不可恢复错误立即终止，不产生半成品状态

use crate::config::AppConfig;
use crate::error::{Result, WallsetError};
use crate::fetcher::Fetcher;
use crate::setter::WallpaperApplier;
use crate::source::ImageSource;
use rust_i18n::t;
use std::path::PathBuf;

/// 一次完整流程的结果
#[allow(dead_code)]
#[derive(Debug)]
pub struct Outcome {
    /// 平台调用是否报告成功
    pub applied: bool,
    /// 实际交给平台调用的图片路径
    pub path: PathBuf,
    /// 下载文件是否已按策略删除
    pub removed: bool,
}

/// 执行完整流程：来源解析（web 来源先下载）、校验、设置、清理
pub async fn run(
    source: ImageSource,
    keep: bool,
    config: &AppConfig,
    fetcher: &Fetcher,
    applier: &dyn WallpaperApplier,
) -> Result<Outcome> {
    let is_download = source.is_download();

    let path = match source {
        ImageSource::Local(path) => path,
        ImageSource::Web(url) => {
            println!("{}", t!("downloading", url => url));
            let dir = config.resolve_download_dir()?;
            let saved = fetcher.fetch(&url, &dir).await?;
            println!("{}", t!("saved", path => saved.display()));
            saved
        }
    };

    apply_and_cleanup(path, is_download, keep, applier).await
}

/// 后半段流程，路径已就位
///
/// 清理策略：只有「文件来自下载 && 设置成功 && 未要求保留」时才删除；
/// 删除失败只打印警告，不影响整体完成；设置失败时下载文件保留供排查。
async fn apply_and_cleanup(
    path: PathBuf,
    is_download: bool,
    keep: bool,
    applier: &dyn WallpaperApplier,
) -> Result<Outcome> {
    if !path.exists() {
        return Err(WallsetError::MissingFile(path));
    }

    println!("{}", t!("applying", path => path.display()));
    let applied = applier.apply(&path);

    if applied {
        println!("{}", t!("set_done", path => path.display()));
    } else if is_download {
        println!("{}", t!("set_failed_keep"));
    } else {
        println!("{}", t!("set_failed"));
    }

    let mut removed = false;
    if is_download && applied && !keep {
        println!("{}", t!("deleting", path => path.display()));
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                println!("{}", t!("deleted", name => name));
                removed = true;
            }
            Err(e) => println!("{}", t!("warn_delete", detail => e)),
        }
    }

    Ok(Outcome {
        applied,
        path,
        removed,
    })
}
