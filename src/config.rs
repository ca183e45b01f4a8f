use crate::bench::BenchSettings;
use crate::utils::error::BenchError;
use crate::Result;
use std::path::PathBuf;

/// 默认模型文件
pub const MODEL_PATH: &str = "mnist_cnn.onnx";

/// 默认测试图像
pub const IMAGE_PATH: &str = "digit.png";

#[derive(Debug, Clone)]
pub struct Config {
    /// 模型文件路径
    pub model_path: PathBuf,

    /// 输入图像路径
    pub image_path: PathBuf,

    /// ONNX Runtime配置
    pub onnx_config: OnnxConfig,

    /// 基准测试参数
    pub bench: BenchSettings,
}

#[derive(Debug, Clone)]
pub struct OnnxConfig {
    /// CPU线程数，None 表示使用运行时默认值
    pub intra_threads: Option<usize>,

    /// 优化级别
    pub optimization_level: i32,
}

impl OnnxConfig {
    /// 按硬件并发数设置推理线程
    pub fn detect() -> Self {
        let intra_threads = match std::thread::available_parallelism() {
            Ok(n) => Some(n.get()),
            Err(e) => {
                tracing::warn!(
                    "Could not detect hardware concurrency ({}), using runtime default",
                    e
                );
                None
            }
        };

        Self {
            intra_threads,
            optimization_level: 3,
        }
    }

    pub fn with_intra_threads(mut self, threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(BenchError::Config(
                "thread count must be at least 1".to_string(),
            ));
        }
        self.intra_threads = Some(threads);
        Ok(self)
    }
}

impl Config {
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let mut onnx_config = OnnxConfig::detect();
        if let Some(threads) = threads {
            onnx_config = onnx_config.with_intra_threads(threads)?;
        }

        Ok(Self {
            model_path: PathBuf::from(MODEL_PATH),
            image_path: PathBuf::from(IMAGE_PATH),
            onnx_config,
            bench: BenchSettings::default(),
        })
    }
}
