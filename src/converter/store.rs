//! # 会话结果存储模块
//!
//! ## 设计思路
//!
//! 转换结果只存活于当前会话内存中：新结果插在最前（最近添加优先），
//! 支持按 id 查询/删除与一键清空，进程退出即销毁，永不落盘。
//!
//! ## 实现思路
//!
//! - `Mutex<Vec<ImageResult>>`：列表规模由用户手动添加决定，
//!   线性查找足够，无需索引结构。
//! - id 由进程级原子计数器 + 毫秒时间戳合成，会话内保证唯一。

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use super::{ConvertError, ImageResult};

static RESULT_SEQ: AtomicU64 = AtomicU64::new(0);

/// 生成会话内唯一的结果 id。
pub(crate) fn next_result_id() -> String {
    let seq = RESULT_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("img-{}-{}", Utc::now().timestamp_millis(), seq)
}

/// 会话内结果列表（最近添加在前）。
#[derive(Default)]
pub struct ResultStore {
    items: Mutex<Vec<ImageResult>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<ImageResult>>, ConvertError> {
        self.items
            .lock()
            .map_err(|_| ConvertError::ResourceLimit("结果列表锁已中毒".to_string()))
    }

    /// 插入新结果到列表头部。
    pub fn insert(&self, result: ImageResult) -> Result<(), ConvertError> {
        let mut items = self.lock()?;
        items.insert(0, result);
        Ok(())
    }

    /// 获取当前列表快照（最近添加在前）。
    pub fn list(&self) -> Result<Vec<ImageResult>, ConvertError> {
        Ok(self.lock()?.clone())
    }

    /// 按 id 查询单条结果。
    pub fn get(&self, id: &str) -> Result<ImageResult, ConvertError> {
        self.lock()?
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or_else(|| ConvertError::NotFound(id.to_string()))
    }

    /// 按 id 删除结果，保持其余条目相对顺序不变。
    ///
    /// 返回是否真的删除了条目。
    pub fn remove(&self, id: &str) -> Result<bool, ConvertError> {
        let mut items = self.lock()?;
        let before = items.len();
        items.retain(|item| item.id != id);
        Ok(items.len() < before)
    }

    /// 清空列表，返回清除的条目数。
    pub fn clear(&self) -> Result<usize, ConvertError> {
        let mut items = self.lock()?;
        let removed = items.len();
        items.clear();
        Ok(removed)
    }

    pub fn len(&self) -> Result<usize, ConvertError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, ConvertError> {
        Ok(self.lock()?.is_empty())
    }
}
