pub mod error;

pub use error::BenchError;
