//! # 服务层（可注入状态）
//!
//! ## 设计思路
//!
//! 使用 `ConverterServiceState` 作为 Tauri 注入状态，替代全局单例函数。
//! 好处：
//! 1. 生命周期清晰（由 `main.rs` 统一管理）
//! 2. 测试可创建独立实例，减少共享状态副作用
//! 3. 引擎与结果列表绑定在同一状态里，保证命令层只有一个入口
//!
//! ## 实现思路
//!
//! 对外暴露少量稳定 API：转换（单个/批量/字节/剪贴板）、
//! 列表管理（list / remove / clear）、格式化渲染与复制、配置读写。
//! 多文件批量转换在单次调用内按给定顺序处理，
//! 插入顺序因此是确定的（最后给出的路径排在列表最前）。

use super::{
    output, ConvertEngine, ConvertError, ConverterConfig, ImageInput, ImageResult, OutputFormat,
    ResultStore,
};

/// 批量转换中被拒绝的单个文件。
#[derive(Debug, Clone, serde::Serialize)]
pub struct RejectedFile {
    pub file_name: String,
    /// 诊断用完整错误描述。
    pub reason: String,
    /// 面向用户的提示文案（toast 用），按错误类别区分。
    pub message: String,
}

/// 批量转换结果：成功条目 + 拒绝明细。
///
/// 非图片文件只产生一条拒绝记录，不中断其余文件的转换，
/// 也不会改变结果列表中已有条目。
#[derive(Debug, Clone, serde::Serialize)]
pub struct BatchOutcome {
    pub converted: Vec<ImageResult>,
    pub rejected: Vec<RejectedFile>,
}

/// 图片转换服务状态。
///
/// 作为 Tauri `State` 注入到命令层，内部持有 `ConvertEngine` 与会话结果列表。
pub struct ConverterServiceState {
    engine: ConvertEngine,
    store: ResultStore,
}

impl Default for ConverterServiceState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterServiceState {
    /// 使用默认配置创建服务状态。
    pub fn new() -> Self {
        Self::with_config(ConverterConfig::default())
    }

    /// 使用自定义配置创建服务状态。
    ///
    /// 主要用于测试或后续按场景注入不同策略。
    pub fn with_config(config: ConverterConfig) -> Self {
        Self {
            engine: ConvertEngine::new(config),
            store: ResultStore::new(),
        }
    }

    /// 转换单个输入并存入会话列表。
    pub fn convert_and_store(&self, input: ImageInput) -> Result<ImageResult, ConvertError> {
        let result = self.engine.convert(input)?;
        self.store.insert(result.clone())?;
        Ok(result)
    }

    /// 按给定顺序批量转换文件路径。
    ///
    /// 单个文件失败（非图片、过大、不可读）不会中断整批，
    /// 失败明细进入 `rejected` 供前端逐条提示。
    pub fn convert_files(&self, paths: &[String]) -> Result<BatchOutcome, ConvertError> {
        let mut outcome = BatchOutcome {
            converted: Vec::with_capacity(paths.len()),
            rejected: Vec::new(),
        };

        for path in paths {
            match self.convert_and_store(ImageInput::FilePath(path.clone())) {
                Ok(result) => outcome.converted.push(result),
                Err(err) => {
                    let file_name = std::path::Path::new(path)
                        .file_name()
                        .map(|name| name.to_string_lossy().to_string())
                        .unwrap_or_else(|| path.clone());

                    log::warn!("🚫 批量转换跳过 {}: {}", file_name, err);
                    outcome.rejected.push(RejectedFile {
                        file_name,
                        reason: err.to_string(),
                        message: err.user_message(),
                    });
                }
            }
        }

        Ok(outcome)
    }

    // ── 列表管理 ─────────────────────────────────────────────

    pub fn list_results(&self) -> Result<Vec<ImageResult>, ConvertError> {
        self.store.list()
    }

    pub fn remove_result(&self, id: &str) -> Result<bool, ConvertError> {
        self.store.remove(id)
    }

    pub fn clear_results(&self) -> Result<usize, ConvertError> {
        self.store.clear()
    }

    pub fn result_count(&self) -> Result<usize, ConvertError> {
        self.store.len()
    }

    // ── 渲染与复制 ───────────────────────────────────────────

    /// 按格式渲染单条结果（前端展示用）。
    pub fn render_output(&self, id: &str, format: &str) -> Result<String, ConvertError> {
        let format: OutputFormat = format.parse()?;
        let result = self.store.get(id)?;
        output::render(&result, format)
    }

    /// 渲染并复制单条结果到系统剪贴板。
    pub async fn copy_output(&self, id: &str, format: &str) -> Result<(), ConvertError> {
        let text = self.render_output(id, format)?;
        let config = self.engine.config_snapshot()?;
        self.engine.copy_text_to_clipboard(text, &config).await
    }

    /// 将全部结果作为 JSON 数组复制到系统剪贴板。
    pub async fn copy_all_as_json(&self) -> Result<usize, ConvertError> {
        let results = self.store.list()?;
        let count = results.len();
        let text = output::render_all_json(&results)?;
        let config = self.engine.config_snapshot()?;
        self.engine.copy_text_to_clipboard(text, &config).await?;
        Ok(count)
    }

    // ── 配置 ─────────────────────────────────────────────────

    pub fn get_config(&self) -> Result<ConverterConfig, ConvertError> {
        self.engine.config_snapshot()
    }

    pub fn set_config(&self, config: ConverterConfig) -> Result<(), ConvertError> {
        self.engine.set_config(config)
    }

    /// 提示条时长（命令层发 toast 事件时使用）。
    pub fn toast_duration_ms(&self) -> u64 {
        self.engine
            .config_snapshot()
            .map(|config| config.toast_duration_ms)
            .unwrap_or(3_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::test_support::encode_test_png;

    fn convert_png(service: &ConverterServiceState, name: &str) -> ImageResult {
        service
            .convert_and_store(ImageInput::Bytes {
                file_name: name.to_string(),
                bytes: encode_test_png(8, 8),
            })
            .expect("convert should succeed")
    }

    #[test]
    fn converted_results_are_listed_newest_first_with_unique_ids() {
        let service = ConverterServiceState::new();

        let first = convert_png(&service, "first.png");
        let second = convert_png(&service, "second.png");
        let third = convert_png(&service, "third.png");

        let listed = service.list_results().expect("list failed");
        let ids: Vec<&str> = listed.iter().map(|item| item.id.as_str()).collect();

        assert_eq!(ids, [third.id.as_str(), second.id.as_str(), first.id.as_str()]);
        assert_ne!(first.id, second.id);
        assert_ne!(second.id, third.id);
    }

    #[test]
    fn rejected_input_leaves_list_unchanged() {
        let service = ConverterServiceState::new();
        convert_png(&service, "keep.png");

        let result = service.convert_and_store(ImageInput::Bytes {
            file_name: "notes.txt".to_string(),
            bytes: b"plain text".to_vec(),
        });

        assert!(matches!(result, Err(ConvertError::NotAnImage(_))));
        assert_eq!(service.result_count().expect("count failed"), 1);
    }

    #[test]
    fn remove_and_clear_manage_the_session_list() {
        let service = ConverterServiceState::new();
        let first = convert_png(&service, "a.png");
        convert_png(&service, "b.png");

        assert!(service.remove_result(&first.id).expect("remove failed"));
        assert!(!service.remove_result(&first.id).expect("second remove failed"));
        assert_eq!(service.result_count().expect("count failed"), 1);

        assert_eq!(service.clear_results().expect("clear failed"), 1);
        assert_eq!(service.result_count().expect("count failed"), 0);
    }

    #[test]
    fn batch_convert_skips_bad_files_and_keeps_going() {
        let service = ConverterServiceState::new();

        let dir = std::env::temp_dir();
        let good_path = dir.join("image_to_base64_batch_good.png");
        let bad_path = dir.join("image_to_base64_batch_bad.txt");
        std::fs::write(&good_path, encode_test_png(6, 6)).expect("write png failed");
        std::fs::write(&bad_path, b"not an image").expect("write txt failed");

        let outcome = service
            .convert_files(&[
                bad_path.to_string_lossy().to_string(),
                good_path.to_string_lossy().to_string(),
            ])
            .expect("batch should not fail as a whole");

        let _ = std::fs::remove_file(&good_path);
        let _ = std::fs::remove_file(&bad_path);

        assert_eq!(outcome.converted.len(), 1);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].file_name, "image_to_base64_batch_bad.txt");
        assert_eq!(service.result_count().expect("count failed"), 1);
    }

    #[test]
    fn batch_rejection_messages_distinguish_error_kinds() {
        let mut config = crate::converter::ConverterConfig::default();
        config.max_file_size = 2 * 1024 * 1024;
        let service = ConverterServiceState::with_config(config);

        let dir = std::env::temp_dir();
        let text_path = dir.join("i2b64_reject_text.txt");
        let huge_path = dir.join("i2b64_reject_huge.png");
        std::fs::write(&text_path, b"not an image").expect("write txt failed");
        std::fs::write(&huge_path, vec![0u8; 3 * 1024 * 1024]).expect("write huge failed");
        let missing_path = dir.join("i2b64_reject_missing.png");

        let outcome = service
            .convert_files(&[
                text_path.to_string_lossy().to_string(),
                huge_path.to_string_lossy().to_string(),
                missing_path.to_string_lossy().to_string(),
            ])
            .expect("batch should not fail as a whole");

        let _ = std::fs::remove_file(&text_path);
        let _ = std::fs::remove_file(&huge_path);

        assert_eq!(outcome.rejected.len(), 3);

        // 非图片 → 固定文案；超限/缺失 → 各自具体原因
        assert_eq!(outcome.rejected[0].message, "Please select an image file");
        assert_eq!(outcome.rejected[1].message, outcome.rejected[1].reason);
        assert!(outcome.rejected[1].message.contains("文件过大"));
        assert_eq!(outcome.rejected[2].message, outcome.rejected[2].reason);
        assert!(outcome.rejected[2].message.contains("文件不存在"));
    }

    #[test]
    fn render_output_matches_pure_formatting() {
        let service = ConverterServiceState::new();
        let result = convert_png(&service, "photo.png");

        let rendered = service
            .render_output(&result.id, "css")
            .expect("render failed");
        let expected = output::render(&result, OutputFormat::Css).expect("render failed");

        assert_eq!(rendered, expected);
    }

    #[test]
    fn render_output_reports_unknown_id() {
        let service = ConverterServiceState::new();

        let result = service.render_output("img-0-0", "base64");

        assert!(matches!(result, Err(ConvertError::NotFound(_))));
    }

    #[test]
    fn config_round_trips_through_service() {
        let service = ConverterServiceState::new();

        let mut config = service.get_config().expect("get config failed");
        config.toast_duration_ms = 4_500;
        service.set_config(config).expect("set config failed");

        assert_eq!(service.toast_duration_ms(), 4_500);
    }
}
