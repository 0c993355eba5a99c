//! # 加载模块
//!
//! ## 设计思路
//!
//! 统一处理不同来源（本地文件 / 内存字节 / 系统剪贴板）的原始字节加载，
//! 并在"尽可能早"的阶段执行体积校验。目标是尽快失败，
//! 减少不必要的内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! - 文件：存在性 + metadata 体积限制 + 读取。
//! - 字节：长度限制后直接接收。
//! - 剪贴板：`arboard` 读出的是 RGBA 像素而非源文件字节，
//!   先在内存中编码为 PNG，再进入与其他来源相同的链路。
//! - 签名校验统一放在 probe 阶段，加载层只负责拿到字节。

use std::io::Cursor;
use std::path::Path;

use chrono::Local;
use image::{DynamicImage, ImageFormat, RgbaImage};

use super::source::RawImageData;
use super::{ConvertEngine, ConvertError, ConverterConfig};

impl ConvertEngine {
    /// 从本地路径加载图片原始字节。
    pub(super) fn load_from_file(
        &self,
        path: &str,
        config: &ConverterConfig,
    ) -> Result<RawImageData, ConvertError> {
        log::info!("📁 开始读取本地图片 - 路径: {}", path);

        let file_path = Path::new(path);
        if !file_path.exists() {
            return Err(ConvertError::FileSystem(format!("文件不存在：{}", path)));
        }

        let metadata = std::fs::metadata(file_path)
            .map_err(|e| ConvertError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        if metadata.len() > config.max_file_size {
            return Err(Self::oversize_error(metadata.len(), config.max_file_size));
        }

        let bytes = std::fs::read(file_path)
            .map_err(|e| ConvertError::FileSystem(format!("无法读取图片文件：{}", e)))?;

        let file_name = file_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string());

        Ok(RawImageData {
            bytes,
            file_name,
            source_hint: "file",
        })
    }

    /// 接收前端直接传递的文件字节。
    pub(super) fn load_from_bytes(
        &self,
        file_name: String,
        bytes: Vec<u8>,
        config: &ConverterConfig,
    ) -> Result<RawImageData, ConvertError> {
        log::info!("📝 接收内存图片字节 - 文件名: {} ({} bytes)", file_name, bytes.len());

        if bytes.len() as u64 > config.max_file_size {
            return Err(Self::oversize_error(bytes.len() as u64, config.max_file_size));
        }

        Ok(RawImageData {
            bytes,
            file_name,
            source_hint: "bytes",
        })
    }

    /// 读取系统剪贴板中的图片。
    ///
    /// 剪贴板图片没有"源文件"，以 PNG 作为规范承载格式，
    /// 文件名按时间戳合成。
    pub(super) fn load_from_clipboard(
        &self,
        config: &ConverterConfig,
    ) -> Result<RawImageData, ConvertError> {
        log::info!("📋 开始读取剪贴板图片");

        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| ConvertError::Clipboard(format!("无法访问剪贴板：{}", e)))?;

        let image_data = clipboard
            .get_image()
            .map_err(|_| ConvertError::NotAnImage("剪贴板中没有图片".to_string()))?;

        let bytes = Self::encode_clipboard_png(
            image_data.width,
            image_data.height,
            image_data.bytes.into_owned(),
        )?;

        if bytes.len() as u64 > config.max_file_size {
            return Err(Self::oversize_error(bytes.len() as u64, config.max_file_size));
        }

        let file_name = format!("clipboard-{}.png", Local::now().format("%Y%m%d%H%M%S"));

        Ok(RawImageData {
            bytes,
            file_name,
            source_hint: "clipboard",
        })
    }

    /// 将剪贴板 RGBA 像素编码为 PNG 字节。
    fn encode_clipboard_png(
        width: usize,
        height: usize,
        rgba_bytes: Vec<u8>,
    ) -> Result<Vec<u8>, ConvertError> {
        let image = RgbaImage::from_raw(width as u32, height as u32, rgba_bytes)
            .ok_or_else(|| ConvertError::Clipboard("创建图像缓冲区失败".to_string()))?;

        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image)
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| ConvertError::Encode(format!("PNG 编码失败：{}", e)))?;

        Ok(cursor.into_inner())
    }

    fn oversize_error(actual: u64, limit: u64) -> ConvertError {
        ConvertError::ResourceLimit(format!(
            "文件过大：{:.2} MB（限制：{:.2} MB）",
            actual as f64 / 1024.0 / 1024.0,
            limit as f64 / 1024.0 / 1024.0
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::test_support::encode_test_png;

    #[test]
    fn load_from_bytes_rejects_oversized_payload() {
        let engine = ConvertEngine::new(Default::default());
        let mut config = ConverterConfig::default();
        config.max_file_size = 16;

        let result = engine.load_from_bytes("big.png".to_string(), vec![0u8; 32], &config);

        assert!(matches!(result, Err(ConvertError::ResourceLimit(_))));
    }

    #[test]
    fn load_from_bytes_keeps_file_name() {
        let engine = ConvertEngine::new(Default::default());
        let config = ConverterConfig::default();
        let png = encode_test_png(4, 4);

        let raw = engine
            .load_from_bytes("logo.png".to_string(), png.clone(), &config)
            .expect("load should succeed");

        assert_eq!(raw.file_name, "logo.png");
        assert_eq!(raw.bytes, png);
        assert_eq!(raw.source_hint, "bytes");
    }

    #[test]
    fn load_from_file_rejects_missing_path() {
        let engine = ConvertEngine::new(Default::default());
        let config = ConverterConfig::default();

        let result = engine.load_from_file("/definitely/not/here.png", &config);

        assert!(matches!(result, Err(ConvertError::FileSystem(_))));
    }

    #[test]
    fn load_from_file_reads_bytes_and_name() {
        let engine = ConvertEngine::new(Default::default());
        let config = ConverterConfig::default();
        let png = encode_test_png(8, 8);

        let dir = std::env::temp_dir();
        let path = dir.join("image_to_base64_loader_test.png");
        std::fs::write(&path, &png).expect("write temp png failed");

        let raw = engine
            .load_from_file(&path.to_string_lossy(), &config)
            .expect("load should succeed");
        let _ = std::fs::remove_file(&path);

        assert_eq!(raw.file_name, "image_to_base64_loader_test.png");
        assert_eq!(raw.bytes, png);
        assert_eq!(raw.source_hint, "file");
    }

    #[test]
    fn clipboard_png_encoder_produces_valid_png() {
        let bytes =
            ConvertEngine::encode_clipboard_png(2, 2, vec![255u8; 2 * 2 * 4]).expect("encode failed");

        let kind = infer::get(&bytes).expect("png should be recognized");
        assert_eq!(kind.mime_type(), "image/png");
    }

    #[test]
    fn clipboard_png_encoder_rejects_short_buffer() {
        let result = ConvertEngine::encode_clipboard_png(16, 16, vec![0u8; 8]);
        assert!(matches!(result, Err(ConvertError::Clipboard(_))));
    }
}
