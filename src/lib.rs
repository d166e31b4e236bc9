//! # slo-address
//!
//! 交互式地址整理工具：从数据表读取原始地址，向自动补全服务查询候选，
//! 由操作员选择最合适的一项（或手动输入），并把结果持久化以便下次续做。
//!
//! ## 功能特性
//!
//! - 首次查询无结果时，自动补全残缺的地名后重试（如 "san luis obisp" -> "san luis obispo"）
//! - 已整理的行不会被重复查询或覆盖
//! - 每次运行有新增数量上限
//! - 中途出错时保留并保存已完成的部分
//!
//! ## 快速开始
//!
//! ```rust
//! use slo_address::QueryNarrower;
//!
//! let narrower = QueryNarrower::global();
//! assert_eq!(
//!     narrower.narrow("123 san luis obisp rd"),
//!     "123 san luis obispo rd"
//! );
//!
//! // 便捷函数
//! let fixed = slo_address::narrow("higuera", "hig", "10 higue st");
//! assert_eq!(fixed, "10 higuera st");
//! ```

mod client;
mod config;
mod error;
mod narrow;
mod prompt;
mod row;
mod session;
mod source;
mod store;

pub use client::{parse_predictions, AutocompleteClient, SuggestionClient};
pub use config::{Config, DEFAULT_ENDPOINT, DEFAULT_QUOTA};
pub use error::{Error, Result};
pub use narrow::{QueryNarrower, DEFAULT_MINIMUM, DEFAULT_TARGET};
pub use prompt::{parse_choice, Choice, Console, Operator, INDEX_PROMPT, NONE_SENTINEL};
pub use row::{RawAddressRow, ResolutionMap, RowId};
pub use session::{BatchOutcome, ResolutionSession};
pub use source::{AddressSource, CsvAddressSource, VecSource};
pub use store::ResumableStore;

/// 便捷函数：按给定目标短语收窄查询
///
/// ```rust
/// let fixed = slo_address::narrow("san luis obispo", "san", "no match here");
/// assert_eq!(fixed, "no match here");
/// ```
pub fn narrow(target: &str, minimum: &str, haystack: &str) -> String {
    QueryNarrower::new(target, minimum).narrow(haystack)
}
