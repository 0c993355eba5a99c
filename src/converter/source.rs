//! # 数据源与数据模型
//!
//! ## 设计思路
//!
//! 将"外部输入类型"、"流水线中间结果"与"最终会话条目"解耦：
//! - `ImageInput` 表示外部来源语义（文件路径 / 内存字节 / 剪贴板）
//! - `RawImageData` 表示已加载但未编码的字节
//! - `ImageResult` 表示一次转换的完整产物，可跨 IPC 序列化

use serde::{Deserialize, Serialize};

/// 图片输入来源。
///
/// 三个渠道对应前端的三种交互：拖放/选择器给路径，
/// 无路径的 `File` 对象给字节，Ctrl+V 走系统剪贴板。
pub enum ImageInput {
    /// 本地文件路径来源（拖放、文件选择器）。
    FilePath(String),
    /// 内存字节来源（前端直接传递文件内容时使用）。
    Bytes { file_name: String, bytes: Vec<u8> },
    /// 系统剪贴板来源（粘贴）。
    Clipboard,
}

/// 加载阶段输出：原始字节、文件名与来源标识。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 展示用文件名（剪贴板来源为合成名）。
    pub(crate) file_name: String,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: &'static str,
}

/// 单次转换的完整结果。
///
/// 仅存活于当前会话内存中，永不落盘。
/// 不变式：`data_uri == "data:" + mime_type + ";base64," + base64`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResult {
    /// 会话内唯一 id（`img-<毫秒时间戳>-<序号>`）。
    pub id: String,
    pub file_name: String,
    /// 源字节体积（字节）。
    pub byte_size: u64,
    /// 按文件签名嗅探出的 MIME 类型（不信任扩展名）。
    pub mime_type: String,
    /// 像素宽度（SVG 无固有尺寸，记 0）。
    pub width: u32,
    /// 像素高度（SVG 无固有尺寸，记 0）。
    pub height: u32,
    /// 标准字母表、带填充的 Base64 文本。
    pub base64: String,
    /// 带 MIME 前缀的 Data URI。
    pub data_uri: String,
}
