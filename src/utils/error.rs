use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("Could not read input image: {0}")]
    ImageRead(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BenchError {
    pub fn error_code(&self) -> &'static str {
        match self {
            BenchError::ModelLoad(_) => "MODEL_LOAD_ERROR",
            BenchError::ImageRead(_) => "IMAGE_READ_ERROR",
            BenchError::Inference(_) => "INFERENCE_ERROR",
            BenchError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// 单行错误诊断信息
    pub fn diagnostic(&self) -> String {
        format!("Error [{}]: {}", self.error_code(), self)
    }

    /// 进程退出状态（-1 的无符号表示）
    pub fn exit_status(&self) -> u8 {
        255
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            BenchError::ModelLoad("m".into()),
            BenchError::ImageRead("i".into()),
            BenchError::Inference("x".into()),
            BenchError::Config("c".into()),
        ];
        let mut codes: Vec<_> = errors.iter().map(|e| e.error_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(errors.iter().all(|e| e.exit_status() != 0));
    }

    #[test]
    fn test_diagnostic_is_single_line_with_code() {
        let err = BenchError::Inference("shape mismatch".into());
        assert_eq!(
            err.diagnostic(),
            "Error [INFERENCE_ERROR]: Inference failed: shape mismatch"
        );
        assert_eq!(err.diagnostic().lines().count(), 1);
    }

    #[test]
    fn test_message_names_category() {
        let err = BenchError::ImageRead("digit.png: No such file".into());
        assert_eq!(
            err.to_string(),
            "Could not read input image: digit.png: No such file"
        );
        assert!(BenchError::ModelLoad("bad".into())
            .to_string()
            .starts_with("Model loading failed"));
    }
}
