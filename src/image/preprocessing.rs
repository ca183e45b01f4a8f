use crate::image::ImageLoader;
use crate::models::tensor::{InputTensor, INPUT_SHAPE};
use crate::Result;
use image::imageops::{self, FilterType};
use image::GrayImage;
use ndarray::Array4;
use std::path::Path;

pub struct ImagePreprocessor;

impl ImagePreprocessor {
    /// 读取图像并转换为模型输入
    pub fn load(path: &Path) -> Result<InputTensor> {
        let gray = ImageLoader::load_grayscale(path)?;
        Self::to_input_tensor(&gray)
    }

    /// 缩放到 28x28，转换为 f32 并除以 255
    pub fn to_input_tensor(gray: &GrayImage) -> Result<InputTensor> {
        let [_, _, target_h, target_w] = INPUT_SHAPE;

        // 双线性插值
        let resized = if gray.dimensions() == (target_w as u32, target_h as u32) {
            gray.clone()
        } else {
            imageops::resize(gray, target_w as u32, target_h as u32, FilterType::Triangle)
        };

        let data = Array4::from_shape_fn(INPUT_SHAPE, |(_, _, y, x)| {
            resized.get_pixel(x as u32, y as u32)[0] as f32 / 255.0
        });

        InputTensor::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::BenchError;
    use image::Luma;

    fn gradient(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| Luma([((x * 7 + y * 13) % 256) as u8]))
    }

    #[test]
    fn test_shape_and_range_for_various_sizes() {
        for (w, h) in [(28, 28), (1, 1), (56, 40), (300, 17), (13, 200)] {
            let tensor = ImagePreprocessor::to_input_tensor(&gradient(w, h)).unwrap();
            assert_eq!(tensor.shape(), &INPUT_SHAPE);
            assert!(tensor
                .as_array()
                .iter()
                .all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_native_size_values_scaled_exactly() {
        let image = gradient(28, 28);
        let tensor = ImagePreprocessor::to_input_tensor(&image).unwrap();

        for (x, y, pixel) in image.enumerate_pixels() {
            let expected = pixel[0] as f32 / 255.0;
            assert_eq!(tensor.as_array()[[0, 0, y as usize, x as usize]], expected);
        }
    }

    #[test]
    fn test_extremes_map_to_unit_interval() {
        let white = ImagePreprocessor::to_input_tensor(&GrayImage::from_pixel(64, 64, Luma([255])))
            .unwrap();
        assert!(white.as_array().iter().all(|&v| v == 1.0));

        let black = ImagePreprocessor::to_input_tensor(&GrayImage::new(10, 10)).unwrap();
        assert!(black.as_array().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("digit.png");
        gradient(40, 40).save(&path).unwrap();

        let tensor = ImagePreprocessor::load(&path).unwrap();
        assert_eq!(tensor.shape(), &[1, 1, 28, 28]);
    }

    #[test]
    fn test_load_missing_image() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImagePreprocessor::load(&dir.path().join("digit.png")).unwrap_err();
        assert!(matches!(err, BenchError::ImageRead(_)));
    }
}
