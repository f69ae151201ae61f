// source.rs — 图片来源抽象模块
// 定义本地文件 / 网络 URL 两种来源的统一表示，以及首个提示符输入的解析规则

use crate::error::{Result, WallsetError};
use std::path::PathBuf;

/// 壁纸图片的来源
/// 由用户输入构造，消费一次，从不修改
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// 用户给定的本地图片路径
    Local(PathBuf),
    /// 待下载的直链图片 URL
    Web(String),
}

impl ImageSource {
    /// 来源类型的显示名称（用于 "You chose: ..." 回显）
    pub fn kind(&self) -> &'static str {
        match self {
            ImageSource::Local(_) => "local",
            ImageSource::Web(_) => "web",
        }
    }

    /// 该来源解析出的文件是否是临时下载（决定设置成功后是否删除）
    pub fn is_download(&self) -> bool {
        matches!(self, ImageSource::Web(_))
    }
}

/// 首个提示符的解析结果
/// Local / Web 还需要二次提示输入路径或 URL，Direct 表示用户直接粘贴了 URL
#[derive(Debug, Clone, PartialEq)]
pub enum Choice {
    Local,
    Web,
    Direct(String),
}

/// 解析 "Enter your choice (local/web)" 处的输入
///
/// 规则：
/// - 以 http:// 或 https:// 开头 → 视为隐式 web 选择，URL 即输入本身
/// - "local" / "web"（不区分大小写）→ 对应选择
/// - 其余输入 → InvalidChoice，进程以非零退出码终止
pub fn parse_choice(input: &str) -> Result<Choice> {
    let raw = input.trim();

    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Ok(Choice::Direct(raw.to_string()));
    }

    match raw.to_lowercase().as_str() {
        "local" => Ok(Choice::Local),
        "web" => Ok(Choice::Web),
        _ => Err(WallsetError::InvalidChoice(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_choice_accepts_local_and_web() {
        assert_eq!(parse_choice("local").unwrap(), Choice::Local);
        assert_eq!(parse_choice("web").unwrap(), Choice::Web);
        // 大小写不敏感
        assert_eq!(parse_choice("LOCAL").unwrap(), Choice::Local);
        assert_eq!(parse_choice("Web").unwrap(), Choice::Web);
    }

    #[test]
    fn parse_choice_trims_whitespace() {
        assert_eq!(parse_choice("  local  ").unwrap(), Choice::Local);
    }

    #[test]
    fn parse_choice_detects_raw_url() {
        // 直接粘贴 URL 等价于显式选择 web 后再输入同一 URL
        let url = "https://example.com/pic.png";
        assert_eq!(parse_choice(url).unwrap(), Choice::Direct(url.to_string()));
        assert_eq!(
            parse_choice("http://example.com/a.jpg").unwrap(),
            Choice::Direct("http://example.com/a.jpg".to_string())
        );
    }

    #[test]
    fn parse_choice_rejects_unknown_input() {
        let err = parse_choice("banana").unwrap_err();
        match err {
            WallsetError::InvalidChoice(input) => assert_eq!(input, "banana"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn image_source_reports_kind_and_download_flag() {
        let local = ImageSource::Local(PathBuf::from("/tmp/a.jpg"));
        let web = ImageSource::Web("https://example.com/a.jpg".to_string());
        assert_eq!(local.kind(), "local");
        assert_eq!(web.kind(), "web");
        assert!(!local.is_download());
        assert!(web.is_download());
    }
}
