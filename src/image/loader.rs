use crate::utils::error::BenchError;
use crate::Result;
use image::{DynamicImage, GrayImage};
use std::path::Path;

pub struct ImageLoader;

impl ImageLoader {
    /// 从文件路径加载图像
    pub fn from_path(path: &Path) -> Result<DynamicImage> {
        let image = image::open(path)
            .map_err(|e| BenchError::ImageRead(format!("{}: {}", path.display(), e)))?;

        Ok(image)
    }

    /// 以单通道灰度读取图像
    pub fn load_grayscale(path: &Path) -> Result<GrayImage> {
        let gray = Self::from_path(path)?.to_luma8();

        // 空缓冲区视为读取失败
        if gray.width() == 0 || gray.height() == 0 {
            return Err(BenchError::ImageRead(format!(
                "{}: image is empty",
                path.display()
            )));
        }

        tracing::debug!(
            "Loaded {}x{} grayscale image from {}",
            gray.width(),
            gray.height(),
            path.display()
        );

        Ok(gray)
    }
}
