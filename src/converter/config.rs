//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有"可调策略"集中到 `ConverterConfig`，保证运行时行为可观测、可调整、可测试。
//! 转换本身没有档位概念，配置只覆盖输入体积防护、尺寸探测防护、
//! 提示时长与剪贴板写入重试四类参数。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用的配置。
//! - 范围校验放在 `ConvertEngine::set_config`，配置结构保持纯数据。
//! - 直接派生 serde，前端可整体读写。

/// 转换器配置。
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ConverterConfig {
    /// 读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 尺寸探测允许的像素上限（`width * height`），防解压炸弹。
    pub max_decoded_pixels: u64,
    /// 前端提示条展示时长（毫秒）。
    pub toast_duration_ms: u64,
    /// 写入剪贴板失败时最大重试次数。
    pub clipboard_retries: u32,
    /// 重试基础间隔（毫秒）。
    pub clipboard_retry_delay: u64,
    /// 单次写入流程允许的总重试预算（毫秒）。
    pub clipboard_retry_max_total_ms: u64,
    /// 单次退避延迟上限（毫秒）。
    pub clipboard_retry_max_delay_ms: u64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            toast_duration_ms: 3_000,
            clipboard_retries: 3,
            clipboard_retry_delay: 100,
            clipboard_retry_max_total_ms: 1_800,
            clipboard_retry_max_delay_ms: 900,
        }
    }
}
