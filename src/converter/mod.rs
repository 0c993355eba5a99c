//! # 图片转换模块（converter）
//!
//! ## 设计思路
//!
//! 该模块将"来源加载 → 类型嗅探 → 尺寸探测 → Base64 编码 →
//! 会话存储 → 输出格式化 → 写入剪贴板 → Tauri 命令暴露"
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `commands`：仅做 IPC 入参/出参适配（薄封装）
//! - `service`：承载可注入状态（`ConverterServiceState`）
//! - `engine`：编排整条转换流水线
//! - `loader`：负责文件/字节/剪贴板来源的字节加载与体积校验
//! - `probe`：负责 MIME 嗅探与像素尺寸探测
//! - `store`：会话内结果列表（最近添加在前）
//! - `output`：五种输出格式的纯函数渲染
//! - `clipboard_writer`：负责写入剪贴板与重试
//! - `config/error/source`：配置、错误、数据模型
//!
//! ## 新同事快速上手
//!
//! 可以按下面顺序理解调用链：
//!
//! ```text
//! 前端 invoke
//!    ↓
//! commands.rs（参数适配 + toast 事件）
//!    ↓
//! service.rs（State 注入、服务入口、结果列表）
//!    ↓
//! engine.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（来源加载 + 体积校验）
//!    ├─ probe.rs（MIME 嗅探 + 尺寸探测）
//!    └─ output.rs / clipboard_writer.rs（渲染 + 复制）
//!    ↓
//! 返回 AppError 给前端
//! ```

pub mod commands;
mod clipboard_writer;
mod config;
mod engine;
mod error;
mod loader;
pub mod output;
mod probe;
mod service;
mod source;
mod store;

pub use commands::{
    clear_results,
    convert_clipboard_image,
    convert_image_bytes,
    convert_image_file,
    convert_image_files,
    copy_all_as_json,
    copy_output,
    get_converter_config,
    list_results,
    remove_result,
    render_output,
    result_count,
    set_converter_config,
};
pub use config::ConverterConfig;
pub use engine::ConvertEngine;
pub use error::ConvertError;
pub use output::OutputFormat;
pub use service::{BatchOutcome, ConverterServiceState, RejectedFile};
pub use source::{ImageInput, ImageResult};
pub use store::ResultStore;
