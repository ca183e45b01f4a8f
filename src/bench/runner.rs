use crate::bench::types::{BenchReport, BenchSettings, BenchState};
use crate::models::{InferenceEngine, InputTensor, OutputTensor};
use crate::utils::error::BenchError;
use crate::Result;
use std::time::{Duration, Instant};

/// 同一输入重复推理的最大允许误差
const DETERMINISM_TOLERANCE: f32 = 1e-6;

/// 基准测试执行器：预热 -> 计时 -> 报告
pub struct BenchmarkRunner<E> {
    engine: E,
    settings: BenchSettings,
    state: BenchState,
}

impl<E: InferenceEngine> BenchmarkRunner<E> {
    pub fn new(engine: E, settings: BenchSettings) -> Self {
        Self {
            engine,
            settings,
            state: BenchState::Idle,
        }
    }

    pub fn state(&self) -> BenchState {
        self.state
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// 执行完整基准测试，任一推理失败立即返回错误
    pub fn run(&mut self, input: &InputTensor) -> Result<BenchReport> {
        if self.state != BenchState::Idle {
            return Err(BenchError::Config(format!(
                "benchmark cannot start from state {:?}",
                self.state
            )));
        }
        self.settings.validate()?;

        self.advance();
        let reference = self.warm_up(input)?;

        self.advance();
        let total = self.time(input)?;

        self.advance();
        let average_ms = total.as_secs_f64() * 1000.0 / self.settings.timed_runs as f64;

        let output = self.engine.invoke(input)?;
        let predicted = output.argmax(self.settings.num_classes)?;
        if let Some(reference) = reference {
            check_determinism(&reference, &output);
        }

        self.advance();
        tracing::info!(
            "Benchmark completed: runs={}, total={:.3}ms, average={:.3}ms, predicted={}",
            self.settings.timed_runs,
            total.as_secs_f64() * 1000.0,
            average_ms,
            predicted
        );

        Ok(BenchReport {
            warmup_runs: self.settings.warmup_runs,
            timed_runs: self.settings.timed_runs,
            total,
            average_ms,
            predicted,
        })
    }

    /// 预热阶段，返回第一次输出用于确定性校验
    fn warm_up(&mut self, input: &InputTensor) -> Result<Option<OutputTensor>> {
        tracing::info!("Warming up ({} runs)...", self.settings.warmup_runs);

        let mut reference = None;
        for _ in 0..self.settings.warmup_runs {
            let output = self.engine.invoke(input)?;
            if reference.is_none() {
                // 尽早发现类别数不匹配
                output.argmax(self.settings.num_classes)?;
                reference = Some(output);
            }
        }

        Ok(reference)
    }

    /// 计时阶段，只测量整个循环的总耗时
    fn time(&mut self, input: &InputTensor) -> Result<Duration> {
        tracing::info!("Benchmarking ({} runs)...", self.settings.timed_runs);

        let start = Instant::now();
        for _ in 0..self.settings.timed_runs {
            self.engine.invoke(input)?;
        }
        let end = Instant::now();

        Ok(end.saturating_duration_since(start))
    }

    fn advance(&mut self) {
        if let Some(next) = self.state.next() {
            tracing::debug!("Benchmark state: {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}

fn check_determinism(reference: &OutputTensor, output: &OutputTensor) {
    match reference.max_abs_diff(output) {
        Some(diff) if diff <= DETERMINISM_TOLERANCE => {
            tracing::debug!("Output stable across runs (max diff {:e})", diff);
        }
        Some(diff) => {
            tracing::warn!(
                "Model output drifted between runs: max abs diff {:e} exceeds {:e}",
                diff,
                DETERMINISM_TOLERANCE
            );
        }
        None => {
            tracing::warn!(
                "Model output shape changed between runs: {:?} -> {:?}",
                reference.as_array().shape(),
                output.as_array().shape()
            );
        }
    }
}
