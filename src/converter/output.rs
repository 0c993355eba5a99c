//! # 输出格式化模块
//!
//! ## 设计思路
//!
//! 给定一条已存储的结果与目标格式，确定性地产出对应文本。
//! 全部为纯函数：同一结果 + 同一格式必然得到同一字符串，
//! 前端展示与复制到剪贴板共用同一实现，保证两者一致。
//!
//! ## 实现思路
//!
//! - `OutputFormat` 负责格式字符串解析与反向输出（给前端展示与持久化）。
//! - HTML 模板对文件名做最小属性转义，其余格式按字段直接插值。
//! - JSON 走 serde，单条为对象，复制全部为数组。

use super::{ConvertError, ImageResult};

/// 输出格式（面向产品/用户语义）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// 带 MIME 前缀的 Data URI，可直接用于 HTML/CSS。
    DataUri,
    /// 纯 Base64 文本（用于 API 传输）。
    Base64,
    /// CSS `background-image` 规则。
    Css,
    /// HTML `<img>` 标签。
    Html,
    /// JSON 对象。
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConvertError;

    /// 从外部字符串解析格式。
    fn from_str(format: &str) -> Result<Self, Self::Err> {
        match format.trim().to_lowercase().as_str() {
            "data-uri" | "datauri" => Ok(Self::DataUri),
            "base64" => Ok(Self::Base64),
            "css" => Ok(Self::Css),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(ConvertError::InvalidFormat(format!(
                "未知输出格式：{}（可选：data-uri / base64 / css / html / json）",
                other
            ))),
        }
    }
}

impl OutputFormat {
    /// 将格式输出为稳定字符串，供前端展示与持久化。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DataUri => "data-uri",
            Self::Base64 => "base64",
            Self::Css => "css",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

/// 按指定格式渲染单条结果。
pub fn render(result: &ImageResult, format: OutputFormat) -> Result<String, ConvertError> {
    match format {
        OutputFormat::DataUri => Ok(result.data_uri.clone()),
        OutputFormat::Base64 => Ok(result.base64.clone()),
        OutputFormat::Css => Ok(format!("background-image: url({});", result.data_uri)),
        OutputFormat::Html => Ok(render_html(result)),
        OutputFormat::Json => serde_json::to_string_pretty(result)
            .map_err(|e| ConvertError::Encode(format!("JSON 序列化失败：{}", e))),
    }
}

/// 将全部结果渲染为 JSON 数组（复制全部场景）。
pub fn render_all_json(results: &[ImageResult]) -> Result<String, ConvertError> {
    serde_json::to_string_pretty(results)
        .map_err(|e| ConvertError::Encode(format!("JSON 序列化失败：{}", e)))
}

fn render_html(result: &ImageResult) -> String {
    let alt = escape_attribute(&result.file_name);

    // SVG 无固有尺寸时不输出宽高属性
    if result.width == 0 && result.height == 0 {
        format!(r#"<img src="{}" alt="{}">"#, result.data_uri, alt)
    } else {
        format!(
            r#"<img src="{}" alt="{}" width="{}" height="{}">"#,
            result.data_uri, alt, result.width, result.height
        )
    }
}

/// HTML 属性值最小转义。
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
