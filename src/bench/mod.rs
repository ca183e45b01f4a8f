pub mod pipeline;
pub mod runner;
pub mod types;

pub use pipeline::BenchPipeline;
pub use runner::BenchmarkRunner;
pub use types::{BenchReport, BenchSettings, BenchState, NUM_CLASSES, TIMED_RUNS, WARMUP_RUNS};
