//! # 图片转 Base64 工具
//!
//! ## 架构总览
//!
//! 应用分为四个部分：命令入口、转换引擎、会话存储与界面偏好。
//! 图片内容只在内存中流转，转换结果不落盘。
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  前端 (dist/)                 │
//! │   拖放 / 文件选择 / 粘贴 / 复制按钮 / 提示条    │
//! └──────────────────┬───────────────────────────┘
//!                    │ invoke / event
//! ┌──────────────────▼───────────────────────────┐
//! │          converter::commands（IPC 薄层）       │
//! └──────────────────┬───────────────────────────┘
//!                    │
//! ┌──────────────────▼───────────────────────────┐
//! │   ConverterServiceState（托管状态，可注入）     │
//! │   ├─ ConvertEngine  加载→嗅探→探测→编码        │
//! │   └─ ResultStore    会话内结果列表（最新在前）  │
//! └──────────────────┬───────────────────────────┘
//!                    │
//! ┌──────────────────▼───────────────────────────┐
//! │  output（五种格式渲染） / clipboard_writer     │
//! │  notify（toast 事件） / settings（界面偏好）   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## 模块说明
//!
//! - [`converter`]：转换流水线、结果列表、输出渲染与复制命令
//! - [`notify`]：toast 事件发送
//! - [`settings`]：界面偏好（深色模式、默认格式）的持久化
//! - [`error`]：统一的 `AppError`

pub mod converter;
pub mod error;
pub mod notify;
pub mod settings;
