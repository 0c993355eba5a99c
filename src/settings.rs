//! 应用设置存储模块
//!
//! # 设计思路
//!
//! 只持久化界面偏好（深色模式、默认输出格式），以 JSON 存放在应用数据目录。
//! 图片数据与转换结果永不落盘，这是产品承诺，不是实现偷懒。

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Manager};

use crate::converter::OutputFormat;
use crate::error::AppError;

/// 界面偏好设置。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// 深色模式开关。
    pub dark_mode: bool,
    /// 默认输出格式（`OutputFormat::as_str` 的稳定字符串）。
    pub default_format: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            default_format: OutputFormat::DataUri.as_str().to_string(),
        }
    }
}

fn settings_file_path(app: &AppHandle) -> Result<PathBuf, AppError> {
    let app_data_dir = app
        .path()
        .app_data_dir()
        .map_err(|e| AppError::Storage(format!("获取应用数据目录失败: {}", e)))?;

    fs::create_dir_all(&app_data_dir)
        .map_err(|e| AppError::Storage(format!("创建应用数据目录失败: {}", e)))?;

    Ok(app_data_dir.join("settings.json"))
}

/// 读取界面偏好设置（文件缺失或损坏时回退默认值）。
#[tauri::command]
pub fn get_app_settings(app: AppHandle) -> Result<AppSettings, AppError> {
    let settings_path = settings_file_path(&app)?;
    if !settings_path.exists() {
        return Ok(AppSettings::default());
    }

    let content = fs::read_to_string(&settings_path)?;
    match serde_json::from_str::<AppSettings>(&content) {
        Ok(settings) => Ok(settings),
        Err(err) => {
            log::warn!("⚠️ 设置文件损坏，回退默认值: {err}");
            Ok(AppSettings::default())
        }
    }
}

/// 写入界面偏好设置。
#[tauri::command]
pub fn set_app_settings(app: AppHandle, settings: AppSettings) -> Result<(), AppError> {
    // 默认格式必须是已知格式，否则前端下次启动会拿到无效值
    settings
        .default_format
        .parse::<OutputFormat>()
        .map_err(|e| AppError::Storage(e.to_string()))?;

    let settings_path = settings_file_path(&app)?;
    let content = serde_json::to_string_pretty(&settings)
        .map_err(|e| AppError::Storage(format!("序列化设置失败: {}", e)))?;

    fs::write(settings_path, content)?;
    Ok(())
}
