//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ConvertEngine` 只负责流程编排与配置管理，不直接与 Tauri 绑定。
//! 处理链路固定为：
//! 1. 读取配置快照
//! 2. 按来源加载原始字节
//! 3. 嗅探 MIME + 探测像素尺寸
//! 4. Base64 编码并拼装 Data URI
//!
//! ## 实现思路
//!
//! - 配置通过 `Arc<RwLock<ConverterConfig>>` 支持运行时调整。
//! - 单次请求内使用"同一配置快照"，避免处理中途配置漂移。
//! - 记录 `load/probe/encode/total` 阶段耗时，便于性能诊断。

use std::sync::{Arc, RwLock};
use std::time::Instant;

use base64::{Engine as _, engine::general_purpose};

use super::store::next_result_id;
use super::{ConvertError, ConverterConfig, ImageInput, ImageResult};

/// 图片转换器。
///
/// 封装配置状态，并编排各子模块实现完整流程。
pub struct ConvertEngine {
    config: Arc<RwLock<ConverterConfig>>,
}

impl ConvertEngine {
    /// 根据初始配置创建转换器。
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// 获取配置快照。
    ///
    /// 作用：保证单次请求链路使用一致参数。
    pub fn config_snapshot(&self) -> Result<ConverterConfig, ConvertError> {
        self.config
            .read()
            .map(|cfg| cfg.clone())
            .map_err(|_| ConvertError::ResourceLimit("配置读取锁已中毒".to_string()))
    }

    /// 覆盖运行时配置（带范围校验）。
    pub fn set_config(&self, candidate: ConverterConfig) -> Result<(), ConvertError> {
        if !(1024 * 1024..=500 * 1024 * 1024).contains(&candidate.max_file_size) {
            return Err(ConvertError::InvalidFormat(
                "max_file_size 必须在 1MB~500MB 之间".to_string(),
            ));
        }
        if candidate.max_decoded_pixels < 1_000_000 {
            return Err(ConvertError::InvalidFormat(
                "max_decoded_pixels 不能小于 100 万像素".to_string(),
            ));
        }
        if !(500..=30_000).contains(&candidate.toast_duration_ms) {
            return Err(ConvertError::InvalidFormat(
                "toast_duration_ms 必须在 500~30000 毫秒之间".to_string(),
            ));
        }
        if !(200..=30_000).contains(&candidate.clipboard_retry_max_total_ms) {
            return Err(ConvertError::InvalidFormat(
                "clipboard_retry_max_total_ms 必须在 200~30000 毫秒之间".to_string(),
            ));
        }
        if !(10..=5_000).contains(&candidate.clipboard_retry_max_delay_ms) {
            return Err(ConvertError::InvalidFormat(
                "clipboard_retry_max_delay_ms 必须在 10~5000 毫秒之间".to_string(),
            ));
        }
        if candidate.clipboard_retry_max_delay_ms > candidate.clipboard_retry_max_total_ms {
            return Err(ConvertError::InvalidFormat(
                "clipboard_retry_max_delay_ms 不能大于 clipboard_retry_max_total_ms".to_string(),
            ));
        }

        let mut config = self
            .config
            .write()
            .map_err(|_| ConvertError::ResourceLimit("配置写入锁已中毒".to_string()))?;
        *config = candidate;

        log::info!(
            "⚙️ 转换器配置已更新：max_file_size={} max_decoded_pixels={} toast={}ms",
            config.max_file_size,
            config.max_decoded_pixels,
            config.toast_duration_ms
        );

        Ok(())
    }

    /// 处理主入口：从任意来源加载并转换为 Base64 结果。
    pub fn convert(&self, input: ImageInput) -> Result<ImageResult, ConvertError> {
        let config = self.config_snapshot()?;
        let total_start = Instant::now();

        let load_start = Instant::now();
        let raw = match input {
            ImageInput::FilePath(path) => self.load_from_file(&path, &config)?,
            ImageInput::Bytes { file_name, bytes } => {
                self.load_from_bytes(file_name, bytes, &config)?
            }
            ImageInput::Clipboard => self.load_from_clipboard(&config)?,
        };
        let load_elapsed = load_start.elapsed();

        let probe_start = Instant::now();
        let mime_type = Self::sniff_image_mime(&raw.bytes)?;
        let (width, height) = self.probe_dimensions(&raw.bytes, &mime_type, &config)?;
        let probe_elapsed = probe_start.elapsed();

        let encode_start = Instant::now();
        let byte_size = raw.bytes.len() as u64;
        let base64 = general_purpose::STANDARD.encode(&raw.bytes);
        let data_uri = format!("data:{};base64,{}", mime_type, base64);
        let encode_elapsed = encode_start.elapsed();

        let result = ImageResult {
            id: next_result_id(),
            file_name: raw.file_name,
            byte_size,
            mime_type,
            width,
            height,
            base64,
            data_uri,
        };

        let total_elapsed = total_start.elapsed();
        log::info!(
            "✅ 图片转换完成 - 来源: {} 尺寸: {}x{} mime: {} load={}ms probe={}ms encode={}ms total={}ms",
            raw.source_hint,
            result.width,
            result.height,
            result.mime_type,
            load_elapsed.as_millis(),
            probe_elapsed.as_millis(),
            encode_elapsed.as_millis(),
            total_elapsed.as_millis()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::test_support::encode_test_png;
    use base64::{Engine as _, engine::general_purpose};

    fn convert_bytes(engine: &ConvertEngine, name: &str, bytes: Vec<u8>) -> Result<ImageResult, ConvertError> {
        engine.convert(ImageInput::Bytes {
            file_name: name.to_string(),
            bytes,
        })
    }

    #[test]
    fn convert_round_trips_source_bytes() {
        let engine = ConvertEngine::new(ConverterConfig::default());
        let png = encode_test_png(24, 16);

        let result = convert_bytes(&engine, "sample.png", png.clone()).expect("convert failed");

        let decoded = general_purpose::STANDARD
            .decode(&result.base64)
            .expect("base64 decode failed");
        assert_eq!(decoded, png);
        assert_eq!(result.byte_size, png.len() as u64);
        assert_eq!(result.mime_type, "image/png");
        assert_eq!((result.width, result.height), (24, 16));
    }

    #[test]
    fn convert_builds_data_uri_from_parts() {
        let engine = ConvertEngine::new(ConverterConfig::default());
        let png = encode_test_png(8, 8);

        let result = convert_bytes(&engine, "a.png", png).expect("convert failed");

        assert_eq!(
            result.data_uri,
            format!("data:{};base64,{}", result.mime_type, result.base64)
        );
    }

    #[test]
    fn convert_rejects_non_image_bytes() {
        let engine = ConvertEngine::new(ConverterConfig::default());

        let result = convert_bytes(&engine, "notes.txt", b"just some text".to_vec());

        assert!(matches!(result, Err(ConvertError::NotAnImage(_))));
    }

    #[test]
    fn convert_assigns_unique_ids() {
        let engine = ConvertEngine::new(ConverterConfig::default());
        let png = encode_test_png(4, 4);

        let first = convert_bytes(&engine, "a.png", png.clone()).expect("convert failed");
        let second = convert_bytes(&engine, "b.png", png).expect("convert failed");

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn convert_accepts_svg_with_zero_dimensions() {
        let engine = ConvertEngine::new(ConverterConfig::default());
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"></svg>"#;

        let result = convert_bytes(&engine, "icon.svg", svg.to_vec()).expect("convert failed");

        assert_eq!(result.mime_type, "image/svg+xml");
        assert_eq!((result.width, result.height), (0, 0));
        assert!(result.data_uri.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn set_config_rejects_out_of_range_values() {
        let engine = ConvertEngine::new(ConverterConfig::default());

        let mut too_small = ConverterConfig::default();
        too_small.max_file_size = 1024;
        assert!(matches!(
            engine.set_config(too_small),
            Err(ConvertError::InvalidFormat(_))
        ));

        let mut bad_toast = ConverterConfig::default();
        bad_toast.toast_duration_ms = 100;
        assert!(matches!(
            engine.set_config(bad_toast),
            Err(ConvertError::InvalidFormat(_))
        ));

        let mut bad_retry = ConverterConfig::default();
        bad_retry.clipboard_retry_max_delay_ms = 2_000;
        bad_retry.clipboard_retry_max_total_ms = 1_000;
        assert!(matches!(
            engine.set_config(bad_retry),
            Err(ConvertError::InvalidFormat(_))
        ));
    }

    #[test]
    fn set_config_accepts_valid_values_and_applies_them() {
        let engine = ConvertEngine::new(ConverterConfig::default());

        let mut candidate = ConverterConfig::default();
        candidate.max_file_size = 8 * 1024 * 1024;
        candidate.toast_duration_ms = 5_000;
        engine.set_config(candidate).expect("valid config should be accepted");

        let snapshot = engine.config_snapshot().expect("config snapshot failed");
        assert_eq!(snapshot.max_file_size, 8 * 1024 * 1024);
        assert_eq!(snapshot.toast_duration_ms, 5_000);
    }

    #[test]
    fn oversized_input_does_not_reach_encoding() {
        let mut config = ConverterConfig::default();
        config.max_file_size = 1024 * 1024;
        let engine = ConvertEngine::new(config);

        // 体积校验用的是字节长度，不需要真实图片内容
        let result = convert_bytes(&engine, "huge.png", vec![0u8; 2 * 1024 * 1024]);

        assert!(matches!(result, Err(ConvertError::ResourceLimit(_))));
    }
}
