pub mod bench;
pub mod config;
pub mod image;
pub mod models;
pub mod utils;

// 重新导出主要类型
pub use bench::{BenchPipeline, BenchReport};
pub use config::Config;
pub use utils::error::BenchError;

pub type Result<T> = std::result::Result<T, BenchError>;
