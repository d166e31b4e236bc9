//! 逐行整理会话：查询、必要时收窄重试、展示候选、记录操作员的选择

use crate::client::SuggestionClient;
use crate::error::{Error, Result};
use crate::narrow::QueryNarrower;
use crate::prompt::{Choice, Operator};
use crate::row::{ResolutionMap, RowId};
use crate::source::AddressSource;
use tracing::{error, info, warn};

/// 一次批处理的结果
///
/// 中途失败时 `error` 非空，`map` 仍包含失败前已完成的部分。
#[derive(Debug)]
pub struct BatchOutcome {
    /// 更新后的完整映射
    pub map: ResolutionMap,
    /// 本次新增的行（按处理顺序）
    pub resolved: Vec<RowId>,
    /// 导致提前终止的错误
    pub error: Option<Error>,
}

impl BatchOutcome {
    /// 是否完整执行（未因错误提前终止）
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// 整理会话
pub struct ResolutionSession<C, O> {
    client: C,
    operator: O,
    narrower: QueryNarrower,
}

impl<C: SuggestionClient, O: Operator> ResolutionSession<C, O> {
    /// 使用默认收窄规则创建会话
    pub fn new(client: C, operator: O) -> Self {
        Self::with_narrower(client, operator, QueryNarrower::default())
    }

    /// 使用指定收窄规则创建会话
    pub fn with_narrower(client: C, operator: O, narrower: QueryNarrower) -> Self {
        Self {
            client,
            operator,
            narrower,
        }
    }

    /// 取回操作员
    pub fn into_operator(self) -> O {
        self.operator
    }

    /// 整理单条地址，返回操作员确认的结果
    pub fn resolve_one(&mut self, raw: &str) -> Result<String> {
        let mut predictions = self.client.fetch_suggestions(raw)?;

        if predictions.is_empty() {
            let cleaned = raw.trim().replace(';', "");
            let retry = self.narrower.narrow(&cleaned);
            warn!(raw, retry = %retry, "no predictions, retrying narrowed query");
            self.operator.say(&format!("Retrying query with {retry}"))?;
            predictions = self.client.fetch_suggestions(&retry)?;
        }

        self.operator.say(&format!("For {raw}\n"))?;
        self.operator
            .say(&format!("Returned {} predictions:", predictions.len()))?;
        for (idx, prediction) in predictions.iter().enumerate() {
            self.operator.say(&format!("\t{idx}: {prediction}"))?;
        }

        let choice = self.operator.choose(predictions.len())?;
        self.operator.say("")?;

        match choice {
            Choice::Pick(idx) if idx < predictions.len() => Ok(predictions.swap_remove(idx)),
            _ => self.operator.ask(&format!("Enter address for '{raw}': ")),
        }
    }

    /// 批量整理
    ///
    /// 按数据源顺序跳过已在 `previous` 中的行，最多新增 `quota` 条。
    /// 任何错误都会终止迭代，但已完成的部分保留在返回的映射中。
    pub fn resolve_batch(
        &mut self,
        source: &dyn AddressSource,
        previous: ResolutionMap,
        quota: usize,
    ) -> BatchOutcome {
        let mut map = previous;
        let mut resolved = Vec::new();

        let rows = match source.rows() {
            Ok(rows) => rows,
            Err(err) => {
                error!(error = %err, "cannot read address source");
                return BatchOutcome {
                    map,
                    resolved,
                    error: Some(err),
                };
            }
        };

        for row in rows {
            if resolved.len() >= quota {
                break;
            }
            if map.contains_key(&row.id) {
                continue;
            }
            match self.resolve_one(&row.text) {
                Ok(address) => {
                    info!(id = %row.id, address = %address, "resolved");
                    map.insert(row.id, address);
                    resolved.push(row.id);
                }
                Err(err) => {
                    error!(id = %row.id, error = %err, "aborting batch");
                    return BatchOutcome {
                        map,
                        resolved,
                        error: Some(err),
                    };
                }
            }
        }

        info!(new = resolved.len(), total = map.len(), "batch finished");
        BatchOutcome {
            map,
            resolved,
            error: None,
        }
    }
}
