use crate::{
    bench::{BenchReport, BenchSettings, BenchmarkRunner},
    image::ImagePreprocessor,
    models::{DigitModel, InferenceEngine},
    Config, Result,
};
use std::path::Path;
use std::time::Instant;

/// 单图推理基准测试流水线
pub struct BenchPipeline;

impl BenchPipeline {
    /// 加载模型与图像并执行基准测试
    pub fn run(config: &Config) -> Result<BenchReport> {
        let start_time = Instant::now();

        let model = DigitModel::load(&config.model_path, &config.onnx_config)?;
        tracing::info!(
            "Model ready in {:.3}s",
            start_time.elapsed().as_secs_f32()
        );

        Self::run_with_engine(model, &config.image_path, config.bench)
    }

    /// 使用给定推理引擎执行基准测试；图像读取失败时不会调用模型
    pub fn run_with_engine<E: InferenceEngine>(
        engine: E,
        image_path: &Path,
        settings: BenchSettings,
    ) -> Result<BenchReport> {
        let input = ImagePreprocessor::load(image_path)?;
        tracing::info!("Input tensor ready: shape={:?}", input.shape());

        let mut runner = BenchmarkRunner::new(engine, settings);
        runner.run(&input)
    }
}
