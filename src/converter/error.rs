//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载转换链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配
//! （例如前端对 `NotAnImage` 只弹提示，不进入错误页）。

/// 图片转换统一错误类型。
///
/// 该类型会在命令层被上转为 `AppError`，最终透传给前端。
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// 输入内容不是图片（签名校验失败）。
    #[error("不是图片：{0}")]
    NotAnImage(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("剪贴板错误：{0}")]
    Clipboard(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    /// 按 id 查询结果失败。
    #[error("结果不存在：{0}")]
    NotFound(String),
}

impl ConvertError {
    /// 面向用户的提示文案（toast 用）。
    ///
    /// 非图片输入统一用固定文案；其余错误（文件缺失、体积超限等）
    /// 保留各自的具体原因。
    pub fn user_message(&self) -> String {
        match self {
            Self::NotAnImage(_) => "Please select an image file".to_string(),
            other => other.to_string(),
        }
    }
}
