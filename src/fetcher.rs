// fetcher.rs — 远程图片下载模块
// 负责单次 HTTP(S) GET：拉取图片字节、推断文件名、写入目标目录

use crate::error::Result;
use reqwest::header;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// URL 路径段与响应头都推断不出文件名时使用的固定文件名主干
const FALLBACK_STEM: &str = "wallset-download";

/// 图片下载器
///
/// 封装了 reqwest::Client（内部有连接池，应复用），
/// 超时在构造时固定，之后的每次请求都受它约束。
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    /// 创建下载器，`timeout` 约束整个请求（连接 + 读取响应体）
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// 下载 `url` 指向的图片并写入 `save_dir`，返回写入文件的绝对路径
    ///
    /// 单次请求，不重试：传输错误、超时、非成功状态码都映射为 Network 错误，
    /// 写入失败映射为 Io 错误，两者都会中止整个流程。
    /// 同名文件存在时静默覆盖。
    pub async fn fetch(&self, url: &str, save_dir: &Path) -> Result<PathBuf> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        // 文件名从重定向后的最终 URL 推断，先于 bytes() 取出（bytes 会消费响应）
        let segment = response
            .url()
            .path_segments()
            .and_then(|mut segs| segs.next_back())
            .map(str::to_string);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let filename = resolve_filename(segment.as_deref(), content_type.as_deref());
        let save_path = save_dir.join(filename);

        let bytes = response.bytes().await?;
        tokio::fs::write(&save_path, &bytes).await?;

        Ok(std::path::absolute(&save_path)?)
    }
}

/// 推断保存用的文件名
///
/// 优先取 URL 的最后一个路径段；段缺失或不含扩展名时，
/// 根据响应的 Content-Type 推断扩展名并合成固定文件名。
/// 结果保证带有非空扩展名。
fn resolve_filename(segment: Option<&str>, content_type: Option<&str>) -> String {
    // 只接受"主干.扩展名"两部分都非空的段，保证结果一定带扩展名
    if let Some(name) = segment {
        if let Some((stem, ext)) = name.rsplit_once('.') {
            if !stem.is_empty() && !ext.is_empty() {
                return name.to_string();
            }
        }
    }

    // Content-Type 可能带 "; charset=..." 等参数，只看主体部分
    let essence = content_type
        .unwrap_or_default()
        .split(';')
        .next()
        .unwrap_or_default()
        .trim();

    format!("{}{}", FALLBACK_STEM, extension_for(essence))
}

/// 常见图片 MIME 类型到扩展名的映射，无法识别时退回通用的 .jpg
fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/bmp" => ".bmp",
        "image/avif" => ".avif",
        _ => ".jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WallsetError;

    #[test]
    fn filename_from_url_segment_is_kept() {
        assert_eq!(
            resolve_filename(Some("pic.png"), Some("image/jpeg")),
            "pic.png"
        );
    }

    #[test]
    fn missing_segment_synthesizes_name_from_content_type() {
        assert_eq!(
            resolve_filename(None, Some("image/png")),
            "wallset-download.png"
        );
        assert_eq!(
            resolve_filename(Some(""), Some("image/webp")),
            "wallset-download.webp"
        );
    }

    #[test]
    fn segment_without_extension_falls_back_to_content_type() {
        assert_eq!(
            resolve_filename(Some("photo"), Some("image/gif")),
            "wallset-download.gif"
        );
        // 扩展名或主干为空的段同样不可信
        assert_eq!(
            resolve_filename(Some("photo."), Some("image/gif")),
            "wallset-download.gif"
        );
        assert_eq!(
            resolve_filename(Some(".gif"), Some("image/png")),
            "wallset-download.png"
        );
    }

    #[test]
    fn content_type_parameters_are_ignored() {
        assert_eq!(
            resolve_filename(None, Some("image/png; charset=utf-8")),
            "wallset-download.png"
        );
    }

    #[test]
    fn unresolvable_content_type_defaults_to_jpg() {
        assert_eq!(resolve_filename(None, None), "wallset-download.jpg");
        assert_eq!(
            resolve_filename(Some("photo"), Some("application/octet-stream")),
            "wallset-download.jpg"
        );
    }

    #[test]
    fn resolved_filename_always_has_extension() {
        let cases = [
            (Some("a.jpg"), None),
            (Some("noext"), None),
            (None, Some("image/bmp")),
            (None, None),
        ];
        for (segment, content_type) in cases {
            let name = resolve_filename(segment, content_type);
            assert!(name.rsplit('.').next().is_some_and(|ext| !ext.is_empty()));
            assert!(name.contains('.'));
        }
    }

    #[tokio::test]
    async fn unreachable_host_reports_network_error() {
        let fetcher = Fetcher::new(Duration::from_secs(2)).unwrap();
        let dir = tempfile::tempdir().unwrap();

        // 1 号端口按惯例无服务监听，连接会被立即拒绝（或触底超时）
        let err = fetcher
            .fetch("http://127.0.0.1:1/pic.jpg", dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, WallsetError::Network(_)));
        // 未写入任何文件
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
