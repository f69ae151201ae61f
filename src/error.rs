// error.rs — 错误类型定义模块
// 流程中每类错误的处理方式不同（退出码、清理策略、警告降级），
// 因此用枚举区分，而不是统一的 Box<dyn Error>

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WallsetError {
    /// 首个提示符处输入了既不是 local/web 也不是 URL 的内容
    /// 这是唯一以非零退出码终止进程的错误
    #[error("invalid choice: {0}")]
    InvalidChoice(String),

    /// 下载请求失败：传输错误、超时或非成功状态码
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 文件写入等 IO 失败（删除失败不走这里，只降级为警告）
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// 解析出的图片路径在磁盘上不存在
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// 配置键或值不合法
    #[error("config error: {0}")]
    Config(String),

    /// 用户在交互阶段主动取消（Ctrl-C）
    #[error("operation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, WallsetError>;
