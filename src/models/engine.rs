use crate::models::tensor::{InputTensor, OutputTensor};
use crate::Result;

/// 前向推理接口：invoke(input) -> output
///
/// 调用方保证串行调用，同一输入可重复使用。
pub trait InferenceEngine {
    fn invoke(&mut self, input: &InputTensor) -> Result<OutputTensor>;
}

impl<E: InferenceEngine + ?Sized> InferenceEngine for &mut E {
    fn invoke(&mut self, input: &InputTensor) -> Result<OutputTensor> {
        (**self).invoke(input)
    }
}
