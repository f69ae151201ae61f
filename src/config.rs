// config.rs — 配置管理模块
// 遵循 Unix 风格：优先从 ~/.config/wallset/config.toml 读取配置

use crate::error::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shellexpand::tilde;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 展开路径中的 ~ 和环境变量 ($HOME, $XDG_CONFIG_HOME 等)
/// 支持格式: ~/path, $HOME/path, ${HOME}/path
pub fn expand_path(path_str: &str) -> PathBuf {
    let expanded = tilde(path_str).into_owned();
    PathBuf::from(expanded)
}

/// 映射 config.toml 文件内容的嵌套结构体
#[derive(Debug, Deserialize, Serialize, Default, JsonSchema)]
struct ConfigFile {
    #[serde(default)]
    common: CommonConfig,
    #[serde(default)]
    network: NetworkConfig,
}

#[derive(Debug, Deserialize, Serialize, Default, JsonSchema)]
struct CommonConfig {
    /// 下载图片的保存目录 (支持 ~、$HOME 等环境变量，相对路径则相对于 $HOME)
    /// 不配置则使用当前工作目录
    download_dir: Option<String>,
    /// 设置成功后是否保留下载的图片（默认删除）
    #[serde(default)]
    keep_downloads: bool,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
struct NetworkConfig {
    /// 下载请求的超时秒数，覆盖整个请求（连接 + 读取）
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

/// 应用全局配置项
pub struct AppConfig {
    /// 下载图片的保存目录（优先级：ENV > TOML；None 表示当前工作目录）
    pub download_dir: Option<PathBuf>,
    /// 设置成功后是否保留下载的图片
    pub keep_downloads: bool,
    /// 下载超时秒数
    pub timeout_secs: u64,
    /// 配置文件所在路径
    pub config_path: PathBuf,
}

impl AppConfig {
    /// 初始化配置
    pub fn new() -> Self {
        let home = env::var("HOME")
            .or_else(|_| env::var("USERPROFILE"))
            .expect("无法获取 $HOME 环境变量");
        let home_path = PathBuf::from(&home);
        let config_dir = home_path.join(".config").join("wallset");
        let config_path = config_dir.join("config.toml");

        let config_file = Self::load_config_from_file(&config_path).unwrap_or_default();

        // 下载目录优先级：环境变量 > 配置文件内容
        // 展开 ~ 和环境变量后，相对路径相对于 $HOME
        let download_dir = env::var("WALLSET_DOWNLOAD_DIR")
            .ok()
            .or(config_file.common.download_dir)
            .map(|dir_str| {
                let p = expand_path(&dir_str);
                if p.is_absolute() { p } else { home_path.join(p) }
            });

        Self {
            download_dir,
            keep_downloads: config_file.common.keep_downloads,
            timeout_secs: config_file.network.timeout_secs,
            config_path,
        }
    }

    /// 辅助函数：解析 TOML 配置文件
    fn load_config_from_file(path: &Path) -> Option<ConfigFile> {
        fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
    }

    /// 确保所有必要的目录都存在
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        if let Some(dir) = &self.download_dir {
            fs::create_dir_all(dir)?;
        }

        Ok(())
    }

    /// 下载请求的超时时长
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 下载目标目录：未配置时回退为当前工作目录
    pub fn resolve_download_dir(&self) -> Result<PathBuf> {
        match &self.download_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(env::current_dir()?),
        }
    }

    /// 当前配置的文件快照，供保存和导出共用
    fn snapshot(&self) -> ConfigFile {
        ConfigFile {
            common: CommonConfig {
                download_dir: self
                    .download_dir
                    .as_ref()
                    .map(|p| p.to_string_lossy().to_string()),
                keep_downloads: self.keep_downloads,
            },
            network: NetworkConfig {
                timeout_secs: self.timeout_secs,
            },
        }
    }

    /// 将配置保存回文件
    pub fn save(&self) -> std::io::Result<()> {
        let toml_str = toml::to_string_pretty(&self.snapshot()).map_err(std::io::Error::other)?;
        fs::write(&self.config_path, toml_str)
    }

    /// 获取配置文件的 JSON Schema
    pub fn get_schema() -> String {
        let schema = schemars::schema_for!(ConfigFile);
        serde_json::to_string_pretty(&schema).unwrap()
    }

    /// 将当前配置转换为 TOML 字符串
    pub fn to_toml(&self) -> String {
        let toml_str = toml::to_string_pretty(&self.snapshot())
            .unwrap_or_else(|_| "# Error serializing config".to_string());

        // toml 库不支持带注释序列化，手动在 [network] 节前插入说明
        toml_str.replace(
            "[network]",
            "# 下载目录未配置时使用当前工作目录\n# download_dir = \"~/Pictures\"\n\n[network]",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_file_yields_defaults() {
        let file: ConfigFile = toml::from_str("").unwrap();
        assert!(file.common.download_dir.is_none());
        assert!(!file.common.keep_downloads);
        assert_eq!(file.network.timeout_secs, 15);
    }

    #[test]
    fn config_file_sections_parse() {
        let file: ConfigFile = toml::from_str(
            r#"
            [common]
            download_dir = "~/Pictures/wallset"
            keep_downloads = true

            [network]
            timeout_secs = 30
            "#,
        )
        .unwrap();
        assert_eq!(
            file.common.download_dir.as_deref(),
            Some("~/Pictures/wallset")
        );
        assert!(file.common.keep_downloads);
        assert_eq!(file.network.timeout_secs, 30);
    }

    #[test]
    fn expand_path_keeps_absolute_paths() {
        assert_eq!(expand_path("/tmp/pics"), PathBuf::from("/tmp/pics"));
    }
}
