//! # Tauri 命令层
//!
//! ## 设计思路
//!
//! 命令层仅做 IPC 参数接收与结果返回，不承载业务逻辑。
//! 所有实际处理交由 `ConverterServiceState`，保持命令函数薄、稳定、易测试。
//! 提示条（toast）事件也在这一层发出：转换被拒绝与复制成功
//! 都只是"通知前端"，不属于转换语义本身。

use tauri::{AppHandle, State, Wry};

use crate::error::AppError;
use crate::notify;

use super::{service, ConvertError, ConverterConfig, ImageInput, ImageResult, OutputFormat};

fn notify_convert_error(
    app: &AppHandle<Wry>,
    state: &State<'_, service::ConverterServiceState>,
    error: &ConvertError,
) {
    notify::emit_toast(
        app,
        error.user_message(),
        notify::ToastKind::Error,
        state.toast_duration_ms(),
    );
}

fn copied_message(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::DataUri => "Data URI copied!",
        OutputFormat::Base64 => "Base64 copied!",
        OutputFormat::Css => "CSS copied!",
        OutputFormat::Html => "HTML copied!",
        OutputFormat::Json => "JSON copied!",
    }
}

// ── 转换 ─────────────────────────────────────────────────────

/// 转换单个本地图片文件。
#[tauri::command]
pub async fn convert_image_file(
    state: State<'_, service::ConverterServiceState>,
    app: AppHandle<Wry>,
    path: String,
) -> Result<ImageResult, AppError> {
    state
        .convert_and_store(ImageInput::FilePath(path))
        .map_err(|err| {
            notify_convert_error(&app, &state, &err);
            AppError::from(err)
        })
}

/// 按给定顺序批量转换本地图片文件（拖放多个文件时使用）。
#[tauri::command]
pub async fn convert_image_files(
    state: State<'_, service::ConverterServiceState>,
    app: AppHandle<Wry>,
    paths: Vec<String>,
) -> Result<service::BatchOutcome, AppError> {
    let outcome = state.convert_files(&paths)?;

    for rejected in &outcome.rejected {
        notify::emit_toast(
            &app,
            rejected.message.clone(),
            notify::ToastKind::Error,
            state.toast_duration_ms(),
        );
        log::debug!("🚫 已拒绝: {} ({})", rejected.file_name, rejected.reason);
    }

    Ok(outcome)
}

/// 转换前端直接传递的图片字节。
#[tauri::command]
pub async fn convert_image_bytes(
    state: State<'_, service::ConverterServiceState>,
    app: AppHandle<Wry>,
    file_name: String,
    bytes: Vec<u8>,
) -> Result<ImageResult, AppError> {
    state
        .convert_and_store(ImageInput::Bytes { file_name, bytes })
        .map_err(|err| {
            notify_convert_error(&app, &state, &err);
            AppError::from(err)
        })
}

/// 转换系统剪贴板中的图片（粘贴渠道）。
#[tauri::command]
pub async fn convert_clipboard_image(
    state: State<'_, service::ConverterServiceState>,
    app: AppHandle<Wry>,
) -> Result<ImageResult, AppError> {
    state
        .convert_and_store(ImageInput::Clipboard)
        .map_err(|err| {
            notify_convert_error(&app, &state, &err);
            AppError::from(err)
        })
}

// ── 列表管理 ─────────────────────────────────────────────────

/// 获取当前会话的全部结果（最近添加在前）。
#[tauri::command]
pub fn list_results(
    state: State<'_, service::ConverterServiceState>,
) -> Result<Vec<ImageResult>, AppError> {
    Ok(state.list_results()?)
}

/// 按 id 删除单条结果。
#[tauri::command]
pub fn remove_result(
    state: State<'_, service::ConverterServiceState>,
    id: String,
) -> Result<bool, AppError> {
    Ok(state.remove_result(&id)?)
}

/// 清空全部结果。
#[tauri::command]
pub fn clear_results(
    state: State<'_, service::ConverterServiceState>,
) -> Result<usize, AppError> {
    Ok(state.clear_results()?)
}

/// 当前结果条数。
#[tauri::command]
pub fn result_count(
    state: State<'_, service::ConverterServiceState>,
) -> Result<usize, AppError> {
    Ok(state.result_count()?)
}

// ── 渲染与复制 ───────────────────────────────────────────────

/// 按格式渲染单条结果文本（前端展示用）。
#[tauri::command]
pub fn render_output(
    state: State<'_, service::ConverterServiceState>,
    id: String,
    format: String,
) -> Result<String, AppError> {
    Ok(state.render_output(&id, &format)?)
}

/// 渲染并复制单条结果到系统剪贴板，成功后发提示。
#[tauri::command]
pub async fn copy_output(
    state: State<'_, service::ConverterServiceState>,
    app: AppHandle<Wry>,
    id: String,
    format: String,
) -> Result<(), AppError> {
    let parsed: OutputFormat = format.parse()?;
    state.copy_output(&id, &format).await?;

    notify::emit_toast(
        &app,
        copied_message(parsed).to_string(),
        notify::ToastKind::Success,
        state.toast_duration_ms(),
    );
    Ok(())
}

/// 将全部结果作为 JSON 数组复制到系统剪贴板。
#[tauri::command]
pub async fn copy_all_as_json(
    state: State<'_, service::ConverterServiceState>,
    app: AppHandle<Wry>,
) -> Result<(), AppError> {
    let count = state.copy_all_as_json().await?;

    notify::emit_toast(
        &app,
        format!("All {} results copied as JSON!", count),
        notify::ToastKind::Success,
        state.toast_duration_ms(),
    );
    Ok(())
}

// ── 配置 ─────────────────────────────────────────────────────

/// 读取转换器运行时配置。
#[tauri::command]
pub fn get_converter_config(
    state: State<'_, service::ConverterServiceState>,
) -> Result<ConverterConfig, AppError> {
    Ok(state.get_config()?)
}

/// 覆盖转换器运行时配置（带范围校验）。
#[tauri::command]
pub fn set_converter_config(
    state: State<'_, service::ConverterServiceState>,
    config: ConverterConfig,
) -> Result<(), AppError> {
    state.set_config(config)?;
    Ok(())
}
