//! # 提示条（toast）事件模块
//!
//! ## 设计思路
//!
//! 前端提示条是纯展示组件：后端只负责在"值得告诉用户"的时刻
//! 发一个 `toast` 事件（复制成功、输入被拒绝），附带展示时长；
//! 定时隐藏由前端完成。事件发送失败只记日志，不影响主流程。

use serde::Serialize;
use tauri::{AppHandle, Emitter, Wry};

/// 前端监听的提示条事件名。
pub const TOAST_EVENT: &str = "toast";

/// 提示条类别。
#[derive(Debug, Clone, Copy)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// 提示条事件负载。
#[derive(Debug, Clone, Serialize)]
pub struct ToastPayload {
    pub message: String,
    pub kind: &'static str,
    /// 前端展示时长（毫秒），到期自动隐藏。
    pub duration_ms: u64,
}

/// 发送提示条事件到前端。
pub fn emit_toast(app: &AppHandle<Wry>, message: String, kind: ToastKind, duration_ms: u64) {
    let payload = ToastPayload {
        message,
        kind: kind.as_str(),
        duration_ms,
    };

    if let Err(err) = app.emit(TOAST_EVENT, payload) {
        log::warn!("⚠️ toast 事件发送失败: {err}");
    }
}
