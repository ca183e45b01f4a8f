use crate::config::OnnxConfig;
use crate::models::engine::InferenceEngine;
use crate::models::tensor::{InputTensor, OutputTensor, INPUT_SHAPE};
use crate::utils::error::BenchError;
use crate::Result;
use once_cell::sync::OnceCell;
use ort::{
    environment::Environment,
    inputs,
    session::{builder::GraphOptimizationLevel, Session},
    value::{TensorElementType, TensorRef, ValueType},
};
use std::path::Path;

/// 进程内唯一的 ONNX Runtime 环境
static ORT_ENV: OnceCell<Environment> = OnceCell::new();

fn ort_environment() -> Result<&'static Environment> {
    ORT_ENV.get_or_try_init(|| {
        ort::init()
            .with_name("digit-bench")
            .build()
            .map_err(|e| BenchError::ModelLoad(format!("ONNX Runtime init failed: {}", e)))
    })
}

/// 手写数字分类模型（ONNX）
pub struct DigitModel {
    session: Session,
    input_name: String,  // 动态发现的输入名称
    output_name: String, // 动态发现的输出名称
}

impl DigitModel {
    /// 加载模型并完成会话构建；导出的ONNX推理图不含训练期算子
    pub fn load(model_path: &Path, onnx_config: &OnnxConfig) -> Result<Self> {
        if !model_path.exists() {
            return Err(BenchError::ModelLoad(format!(
                "Model not found: {}",
                model_path.display()
            )));
        }

        tracing::info!("Loading digit model from: {}", model_path.display());

        let mut builder = Session::builder(ort_environment()?)
            .map_err(|e| BenchError::ModelLoad(e.to_string()))?
            .with_optimization_level(optimization_level(onnx_config))
            .map_err(|e| BenchError::ModelLoad(e.to_string()))?;

        if let Some(threads) = onnx_config.intra_threads {
            tracing::info!("Using {} intra-op threads", threads);
            builder = builder
                .with_intra_threads(threads)
                .map_err(|e| BenchError::ModelLoad(e.to_string()))?;
        }

        let session = builder.commit_from_file(model_path).map_err(|e| {
            BenchError::ModelLoad(format!("{}: {}", model_path.display(), e))
        })?;

        let input_name = match session.inputs().first() {
            Some(input) => {
                check_input_signature(input.dtype())?;
                input.name().to_string()
            }
            None => {
                return Err(BenchError::ModelLoad("Model has no inputs".to_string()));
            }
        };

        let output_name = match session.outputs().first() {
            Some(output) => output.name().to_string(),
            None => {
                return Err(BenchError::ModelLoad("Model has no outputs".to_string()));
            }
        };

        tracing::info!("Model input: '{}', output: '{}'", input_name, output_name);
        for (i, output) in session.outputs().iter().enumerate() {
            tracing::debug!("Model output[{}]: '{}'", i, output.name());
        }

        Ok(Self {
            session,
            input_name,
            output_name,
        })
    }
}

impl InferenceEngine for DigitModel {
    fn invoke(&mut self, input: &InputTensor) -> Result<OutputTensor> {
        let input_tensor = TensorRef::from_array_view(input.as_array())
            .map_err(|e| BenchError::Inference(e.to_string()))?;

        let outputs = self
            .session
            .run(inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| BenchError::Inference(e.to_string()))?;

        match outputs.get(&self.output_name) {
            Some(output) => {
                let scores = output
                    .try_extract_array::<f32>()
                    .map_err(|e| BenchError::Inference(e.to_string()))?
                    .into_owned();
                Ok(OutputTensor::new(scores))
            }
            None => {
                let available_outputs: Vec<String> =
                    outputs.keys().map(|s| s.to_string()).collect();
                Err(BenchError::Inference(format!(
                    "Output '{}' not found. Available outputs: {:?}",
                    self.output_name, available_outputs
                )))
            }
        }
    }
}

/// 模型输入必须是 f32 张量，维度与 [1, 1, 28, 28] 一致，负数维度视为动态维
fn check_input_signature(dtype: &ValueType) -> Result<()> {
    let (Some(ty), Some(shape)) = (dtype.tensor_type(), dtype.tensor_shape()) else {
        return Err(BenchError::ModelLoad(format!(
            "Model input must be a tensor, got {:?}",
            dtype
        )));
    };

    if ty != TensorElementType::Float32 {
        return Err(BenchError::ModelLoad(format!(
            "Model input must be f32, got {:?}",
            ty
        )));
    }

    let dims: &[i64] = shape;
    let matches = dims.len() == INPUT_SHAPE.len()
        && dims
            .iter()
            .zip(INPUT_SHAPE.iter())
            .all(|(&declared, &expected)| declared < 0 || declared as usize == expected);
    if !matches {
        return Err(BenchError::ModelLoad(format!(
            "Model expects input shape {:?}, but images are preprocessed to {:?}",
            dims, INPUT_SHAPE
        )));
    }

    Ok(())
}

fn optimization_level(onnx_config: &OnnxConfig) -> GraphOptimizationLevel {
    match onnx_config.optimization_level {
        i32::MIN..=0 => GraphOptimizationLevel::Disable,
        1 => GraphOptimizationLevel::Level1,
        2 => GraphOptimizationLevel::Level2,
        _ => GraphOptimizationLevel::Level3,
    }
}
