//! 操作员交互

use crate::error::{Error, Result};
use std::io::{BufRead, Write};

/// 选择提示语
pub const INDEX_PROMPT: &str = "Index of selected, or -1 if none: ";

/// 表示"都不是"的哨兵值
pub const NONE_SENTINEL: i64 = -1;

/// 操作员的选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// 选中第 n 个候选
    Pick(usize),
    /// 都不合适，手动输入
    Manual,
}

/// 操作员交互接口
pub trait Operator {
    /// 显示一行信息
    fn say(&mut self, line: &str) -> Result<()>;

    /// 显示提示并读取一行（不含换行符）
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// 在 `count` 个候选中选择
    ///
    /// 无法解析为整数或超出 `-1..count` 的输入会重新提示。
    fn choose(&mut self, count: usize) -> Result<Choice> {
        if count == 0 {
            return Ok(Choice::Manual);
        }
        loop {
            let answer = self.ask(INDEX_PROMPT)?;
            if let Some(choice) = parse_choice(&answer, count) {
                return Ok(choice);
            }
        }
    }
}

/// 解析选择输入
pub fn parse_choice(answer: &str, count: usize) -> Option<Choice> {
    let value: i64 = answer.trim().parse().ok()?;
    if value == NONE_SENTINEL {
        return Some(Choice::Manual);
    }
    usize::try_from(value)
        .ok()
        .filter(|&idx| idx < count)
        .map(Choice::Pick)
}

/// 控制台实现，读写任意流
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// 创建控制台
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// 取回输出流
    pub fn into_output(self) -> W {
        self.output
    }
}

impl Console<std::io::StdinLock<'static>, std::io::Stdout> {
    /// 标准输入输出控制台
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Operator for Console<R, W> {
    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}").map_err(|e| Error::OperatorInput(e.to_string()))
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")
            .and_then(|_| self.output.flush())
            .map_err(|e| Error::OperatorInput(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| Error::OperatorInput(e.to_string()))?;
        if read == 0 {
            return Err(Error::OperatorInput("console closed".into()));
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}
