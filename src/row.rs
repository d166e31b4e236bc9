//! 行记录与映射结构

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 源数据表中的行标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RowId {
    fn from(id: u64) -> Self {
        RowId(id)
    }
}

/// 待整理的原始地址行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAddressRow {
    /// 行标识
    pub id: RowId,
    /// 原始地址文本
    pub text: String,
}

impl RawAddressRow {
    /// 创建新的行记录
    pub fn new(id: impl Into<RowId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// 行标识 -> 已确认地址
///
/// 只增不改：已存在的键不会被重新查询或覆盖。
pub type ResolutionMap = BTreeMap<RowId, String>;
