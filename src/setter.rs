// setter.rs — 系统壁纸设置模块

use rust_i18n::t;
use std::path::Path;

/// 平台"设置桌面背景"能力的统一接口
///
/// 约定：返回布尔成功标志，失败原因只打印不上抛，
/// 由调用方根据返回值决定后续动作（是否删除下载文件等）。
pub trait WallpaperApplier {
    /// 将 `path` 指向的图片设为桌面壁纸，单次尝试，不重试
    /// 调用方负责保证文件已存在
    fn apply(&self, path: &Path) -> bool;
}

/// 面向当前桌面环境的默认实现
///
/// 委托给 wallpaper 库，由它识别操作系统并调用相应 API
/// （更新持久化设置并立即广播到当前会话）。
pub struct DesktopApplier;

impl WallpaperApplier for DesktopApplier {
    #[cfg(any(windows, target_os = "macos", target_os = "linux"))]
    fn apply(&self, path: &Path) -> bool {
        // 平台 API 需要绝对路径
        let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

        let Some(path_str) = abs.to_str() else {
            println!("{}", t!("error_utf8", path => abs.display()));
            return false;
        };

        match wallpaper::set_from_path(path_str) {
            Ok(()) => true,
            Err(e) => {
                // 接口保持布尔约定，底层错误只打印供诊断
                println!("{}", t!("error_set_failed", detail => e));
                false
            }
        }
    }

    #[cfg(not(any(windows, target_os = "macos", target_os = "linux")))]
    fn apply(&self, _path: &Path) -> bool {
        println!("{}", t!("error_unsupported"));
        false
    }
}
