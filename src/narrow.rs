//! 查询收窄：在文本中查找目标短语的最长截断形式并替换为完整短语

use once_cell::sync::Lazy;

/// 默认收窄规则的目标短语
pub const DEFAULT_TARGET: &str = "san luis obispo";

/// 默认收窄规则的最短截断
pub const DEFAULT_MINIMUM: &str = "san";

/// 全局默认收窄规则
static DEFAULT_NARROWER: Lazy<QueryNarrower> =
    Lazy::new(|| QueryNarrower::new(DEFAULT_TARGET, DEFAULT_MINIMUM));

/// 查询收窄器
///
/// 当首次查询没有任何候选时，用于把操作员输入中残缺的地名
/// （如 "san luis obisp"、"san luis ob"）补全为完整形式后重试。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryNarrower {
    /// 完整目标短语
    target: String,
    /// 截断的最短字符数（至少 1）
    min_chars: usize,
}

impl QueryNarrower {
    /// 创建收窄器
    ///
    /// 只使用 `minimum` 的字符长度，不比较其内容。
    pub fn new(target: impl Into<String>, minimum: &str) -> Self {
        Self {
            target: target.into(),
            min_chars: minimum.chars().count().max(1),
        }
    }

    /// 获取全局默认收窄器（"san luis obispo"）
    pub fn global() -> &'static QueryNarrower {
        &DEFAULT_NARROWER
    }

    /// 完整目标短语
    pub fn target(&self) -> &str {
        &self.target
    }

    /// 候选截断列表，从完整短语开始逐字符缩短
    ///
    /// 最短不少于 `minimum` 的长度；`minimum` 比目标更长时只包含完整短语。
    pub fn candidates(&self) -> Vec<&str> {
        let boundaries: Vec<usize> = self
            .target
            .char_indices()
            .map(|(i, _)| i)
            .skip(1)
            .chain(std::iter::once(self.target.len()))
            .collect();

        let mut result = vec![self.target.as_str()];
        // boundaries[k] 是前 k+1 个字符的字节长度
        for chars in (self.min_chars..boundaries.len()).rev() {
            result.push(&self.target[..boundaries[chars - 1]]);
        }
        result
    }

    /// 收窄查询
    ///
    /// 依次尝试各个截断，第一个在 `haystack` 中出现的截断，
    /// 其首次出现位置被替换为完整短语；都不匹配时原样返回。
    ///
    /// # 示例
    /// ```rust
    /// use slo_address::QueryNarrower;
    ///
    /// let narrower = QueryNarrower::new("san luis obispo", "san");
    /// assert_eq!(
    ///     narrower.narrow("123 san luis obisp rd"),
    ///     "123 san luis obispo rd"
    /// );
    /// ```
    pub fn narrow(&self, haystack: &str) -> String {
        for candidate in self.candidates() {
            if haystack.contains(candidate) {
                return haystack.replacen(candidate, &self.target, 1);
            }
        }
        haystack.to_string()
    }
}

impl Default for QueryNarrower {
    fn default() -> Self {
        QueryNarrower::global().clone()
    }
}
