use crate::utils::error::BenchError;
use crate::Result;
use std::fmt;
use std::time::Duration;

/// 默认预热次数
pub const WARMUP_RUNS: usize = 10;

/// 默认计时次数
pub const TIMED_RUNS: usize = 1000;

/// 数字类别数量 (0-9)
pub const NUM_CLASSES: usize = 10;

/// 基准测试参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchSettings {
    /// 预热调用次数，结果与耗时均丢弃
    pub warmup_runs: usize,
    /// 计时调用次数
    pub timed_runs: usize,
    /// 期望的输出类别数量
    pub num_classes: usize,
}

impl BenchSettings {
    pub fn new(warmup_runs: usize, timed_runs: usize, num_classes: usize) -> Result<Self> {
        let settings = Self {
            warmup_runs,
            timed_runs,
            num_classes,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// 计时次数与类别数必须大于 0
    pub fn validate(&self) -> Result<()> {
        if self.timed_runs == 0 {
            return Err(BenchError::Config(
                "timed run count must be at least 1".to_string(),
            ));
        }
        if self.num_classes == 0 {
            return Err(BenchError::Config(
                "class count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            warmup_runs: WARMUP_RUNS,
            timed_runs: TIMED_RUNS,
            num_classes: NUM_CLASSES,
        }
    }
}

/// 基准测试阶段，只能单向推进
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BenchState {
    Idle,
    WarmingUp,
    Timing,
    Reporting,
    Done,
}

impl BenchState {
    pub fn next(self) -> Option<BenchState> {
        match self {
            BenchState::Idle => Some(BenchState::WarmingUp),
            BenchState::WarmingUp => Some(BenchState::Timing),
            BenchState::Timing => Some(BenchState::Reporting),
            BenchState::Reporting => Some(BenchState::Done),
            BenchState::Done => None,
        }
    }
}

/// 基准测试结果
#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    pub warmup_runs: usize,
    pub timed_runs: usize,
    /// 计时阶段总耗时
    pub total: Duration,
    /// 平均延迟（毫秒）
    pub average_ms: f64,
    /// 最终预测的数字
    pub predicted: usize,
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average inference time: {:.3} ms", self.average_ms)?;
        write!(f, "Predicted digit: {}", self.predicted)
    }
}
