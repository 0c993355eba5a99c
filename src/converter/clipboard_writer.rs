//! # 剪贴板写入模块
//!
//! ## 设计思路
//!
//! 将与操作系统剪贴板交互的逻辑独立出来，便于隔离平台不稳定因素。
//! 使用阻塞线程执行写入，避免阻塞 async 运行时。
//!
//! ## 实现思路
//!
//! 剪贴板在其他应用读写时可能短暂不可用，单次写入失败不直接报错，
//! 而是做有限重试：指数退避 + 抖动，并受总时长预算约束，
//! 避免用户点一次复制却卡住数秒。

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use super::{ConvertEngine, ConvertError, ConverterConfig};

fn compute_backoff_delay_with_jitter(base_delay_ms: u64, attempt: u32, max_delay_ms: u64) -> u64 {
    let exp = base_delay_ms.saturating_mul(1_u64 << attempt.saturating_sub(1).min(8));
    let capped = exp.min(max_delay_ms.max(base_delay_ms));
    let jitter_bound = (capped / 3).max(1);
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let jitter = seed % (jitter_bound + 1);
    capped.saturating_add(jitter)
}

fn would_exceed_retry_budget(elapsed_ms: u64, wait_ms: u64, budget_ms: u64) -> bool {
    elapsed_ms.saturating_add(wait_ms) > budget_ms
}

impl ConvertEngine {
    /// 将格式化文本写入系统剪贴板（含重试）。
    pub(crate) async fn copy_text_to_clipboard(
        &self,
        text: String,
        config: &ConverterConfig,
    ) -> Result<(), ConvertError> {
        log::debug!("📋 准备复制到剪贴板 - {} 字符", text.len());

        let retries = config.clipboard_retries;
        let retry_delay = config.clipboard_retry_delay;
        let retry_max_total_ms = config.clipboard_retry_max_total_ms;
        let retry_max_delay_ms = config.clipboard_retry_max_delay_ms;

        tokio::task::spawn_blocking(move || {
            Self::write_text_with_retry(
                &text,
                retries,
                retry_delay,
                retry_max_total_ms,
                retry_max_delay_ms,
            )
        })
        .await
        .map_err(|e| ConvertError::Clipboard(format!("线程执行失败：{}", e)))?
    }

    /// 在阻塞线程中执行写入 + 重试。
    fn write_text_with_retry(
        text: &str,
        retries: u32,
        retry_delay: u64,
        retry_max_total_ms: u64,
        retry_max_delay_ms: u64,
    ) -> Result<(), ConvertError> {
        let retry_count = retries.max(1);
        let started = Instant::now();
        let mut last_error = None;

        for attempt in 1..=retry_count {
            if attempt > 1 {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                if elapsed_ms >= retry_max_total_ms {
                    log::warn!(
                        "⏱️ 剪贴板写入重试预算耗尽（{}ms >= {}ms）",
                        elapsed_ms,
                        retry_max_total_ms
                    );
                    break;
                }

                let wait_ms = compute_backoff_delay_with_jitter(
                    retry_delay.max(1),
                    attempt - 1,
                    retry_max_delay_ms,
                );

                if would_exceed_retry_budget(elapsed_ms, wait_ms, retry_max_total_ms) {
                    log::warn!(
                        "⏱️ 跳过第 {} 次重试：等待 {}ms 会超过预算 {}ms",
                        attempt,
                        wait_ms,
                        retry_max_total_ms
                    );
                    break;
                }

                log::debug!(
                    "🔄 重试 {}/{}，等待 {}ms（指数退避+抖动）",
                    attempt,
                    retry_count,
                    wait_ms
                );
                std::thread::sleep(Duration::from_millis(wait_ms));
            }

            match Self::try_clipboard_text_write(text) {
                Ok(()) => {
                    log::info!("✅ 复制成功 (尝试 {})", attempt);
                    return Ok(());
                }
                Err(message) => {
                    log::warn!("❌ 尝试 {} 失败: {}", attempt, message);
                    last_error = Some(message);
                }
            }
        }

        Err(ConvertError::Clipboard(
            last_error.unwrap_or_else(|| "未知错误".to_string()),
        ))
    }

    fn try_clipboard_text_write(text: &str) -> Result<(), String> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| format!("无法访问剪贴板：{}", e))?;

        clipboard
            .set_text(text.to_string())
            .map_err(|e| format!("复制失败：{}", e))
    }
}
