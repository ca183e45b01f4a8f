use crate::utils::error::BenchError;
use crate::Result;
use ndarray::{Array4, ArrayD, Ix2};

/// 模型输入尺寸 (N, C, H, W)
pub const INPUT_SHAPE: [usize; 4] = [1, 1, 28, 28];

/// 归一化后的灰度图输入，NCHW布局
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor(Array4<f32>);

impl InputTensor {
    pub fn new(data: Array4<f32>) -> Result<Self> {
        if data.shape() != INPUT_SHAPE {
            return Err(BenchError::Inference(format!(
                "Expected input shape {:?}, got {:?}",
                INPUT_SHAPE,
                data.shape()
            )));
        }

        if let Some(bad) = data
            .iter()
            .find(|v| !v.is_finite() || **v < 0.0 || **v > 1.0)
        {
            return Err(BenchError::Inference(format!(
                "Input value {} outside [0, 1]",
                bad
            )));
        }

        Ok(Self(data))
    }

    pub fn as_array(&self) -> &Array4<f32> {
        &self.0
    }

    pub fn shape(&self) -> &[usize] {
        self.0.shape()
    }
}

/// 单次推理输出
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTensor(ArrayD<f32>);

impl OutputTensor {
    pub fn new(data: ArrayD<f32>) -> Self {
        Self(data)
    }

    pub fn as_array(&self) -> &ArrayD<f32> {
        &self.0
    }

    /// 沿类别维取最大值索引，要求输出为 [1, num_classes]
    pub fn argmax(&self, num_classes: usize) -> Result<usize> {
        let scores = self.0.view().into_dimensionality::<Ix2>().map_err(|_| {
            BenchError::Inference(format!(
                "Expected 2D class scores, got shape {:?}",
                self.0.shape()
            ))
        })?;

        let (batch_size, classes) = scores.dim();
        if batch_size != 1 {
            return Err(BenchError::Inference(format!(
                "Expected batch size 1, got {}",
                batch_size
            )));
        }
        if classes != num_classes {
            return Err(BenchError::Inference(format!(
                "Model produced {} classes, expected {}",
                classes, num_classes
            )));
        }

        let mut max_idx = 0;
        let mut max_score = f32::NEG_INFINITY;
        for (i, &score) in scores.row(0).iter().enumerate() {
            if score.is_nan() {
                return Err(BenchError::Inference(format!(
                    "Class score {} is NaN",
                    i
                )));
            }
            // 并列时保留较小索引
            if score > max_score || i == 0 {
                max_score = score;
                max_idx = i;
            }
        }

        Ok(max_idx)
    }

    /// 两次输出间的最大绝对误差，形状不一致时返回 None
    pub fn max_abs_diff(&self, other: &OutputTensor) -> Option<f32> {
        if self.0.shape() != other.0.shape() {
            return None;
        }
        Some(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f32::max),
        )
    }
}
