//! # 类型嗅探与尺寸探测模块
//!
//! ## 设计思路
//!
//! 对输入字节做两件事，且都在 Base64 编码之前完成：
//! 1. 按文件签名（magic bytes）嗅探 MIME 类型，拒绝一切非图片输入；
//! 2. 仅读取图片头信息获取宽高，不做完整解码。
//!
//! ## 实现思路
//!
//! - 签名嗅探委托 `infer`；SVG 是纯文本没有签名，单独按内容特征识别
//!   （浏览器同样将其视为 `image/*`，原始页面也接受它）。
//! - 宽高通过 `image::ImageReader::into_dimensions` 读取 header，
//!   并按像素上限快速拒绝，降低恶意输入触发高内存开销的风险。
//! - SVG 无固有像素尺寸，宽高记为 0。

use std::io::Cursor;

use image::ImageReader;

use super::{ConvertError, ConvertEngine, ConverterConfig};

/// SVG 内容特征探测的最大前缀长度。
const SVG_PROBE_BYTES: usize = 1024;

pub(crate) const SVG_MIME: &str = "image/svg+xml";

impl ConvertEngine {
    /// 按文件签名嗅探 MIME 类型，非图片输入返回 `NotAnImage`。
    pub(crate) fn sniff_image_mime(bytes: &[u8]) -> Result<String, ConvertError> {
        if bytes.is_empty() {
            return Err(ConvertError::NotAnImage("图片内容为空".to_string()));
        }

        if let Some(kind) = infer::get(bytes) {
            if kind.matcher_type() == infer::MatcherType::Image {
                return Ok(kind.mime_type().to_string());
            }

            return Err(ConvertError::NotAnImage(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        if Self::looks_like_svg(bytes) {
            return Ok(SVG_MIME.to_string());
        }

        Err(ConvertError::NotAnImage("无法识别图片类型".to_string()))
    }

    /// 仅通过内存中的图片头信息读取宽高，并校验像素上限。
    pub(crate) fn probe_dimensions(
        &self,
        bytes: &[u8],
        mime_type: &str,
        config: &ConverterConfig,
    ) -> Result<(u32, u32), ConvertError> {
        if mime_type == SVG_MIME {
            return Ok((0, 0));
        }

        let cursor = Cursor::new(bytes);
        let reader = ImageReader::new(cursor)
            .with_guessed_format()
            .map_err(|e| ConvertError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| ConvertError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))?;

        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| ConvertError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(ConvertError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok((width, height))
    }

    /// 按内容特征判断是否为 SVG 文本。
    ///
    /// 只检查前缀，避免对超长文本做全文扫描。
    /// 截断位置可能落在多字节字符中间，按合法前缀解析即可。
    fn looks_like_svg(bytes: &[u8]) -> bool {
        let probe = &bytes[..bytes.len().min(SVG_PROBE_BYTES)];
        let text = match std::str::from_utf8(probe) {
            Ok(text) => text,
            Err(err) => match std::str::from_utf8(&probe[..err.valid_up_to()]) {
                Ok(valid_prefix) => valid_prefix,
                Err(_) => return false,
            },
        };

        let trimmed = text.trim_start();
        trimmed.starts_with("<svg")
            || (trimmed.starts_with("<?xml") && trimmed.contains("<svg"))
    }
}
