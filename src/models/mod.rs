pub mod classifier;
pub mod engine;
pub mod tensor;

pub use classifier::DigitModel;
pub use engine::InferenceEngine;
pub use tensor::{InputTensor, OutputTensor, INPUT_SHAPE};
