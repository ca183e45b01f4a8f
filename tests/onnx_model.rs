use digit_bench::bench::{BenchPipeline, BenchSettings};
use digit_bench::config::OnnxConfig;
use digit_bench::image::ImagePreprocessor;
use digit_bench::models::{DigitModel, InferenceEngine};
use digit_bench::BenchError;
use image::{GrayImage, Luma};
use std::path::{Path, PathBuf};

// 夹具由 tests/fixtures/make_fixtures.py 生成：Flatten -> Gemm，
// 第 k 类得分为第 k 条水平条带的亮度之和
fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn onnx_config() -> OnnxConfig {
    OnnxConfig {
        intra_threads: Some(1),
        optimization_level: 3,
    }
}

fn write_band_image(dir: &Path, band: u32) -> PathBuf {
    let path = dir.join("digit.png");
    let image = GrayImage::from_fn(28, 28, |_, y| {
        if (y * 10 / 28).min(9) == band {
            Luma([255])
        } else {
            Luma([0])
        }
    });
    image.save(&path).unwrap();
    path
}

#[test]
fn test_session_output_has_one_row_of_scores() {
    let dir = tempfile::tempdir().unwrap();
    let input = ImagePreprocessor::load(&write_band_image(dir.path(), 3)).unwrap();

    let mut model = DigitModel::load(&fixture("band_classifier.onnx"), &onnx_config()).unwrap();
    let output = model.invoke(&input).unwrap();

    assert_eq!(output.as_array().shape(), &[1, 10]);
    assert_eq!(output.argmax(10).unwrap(), 3);
    // 条带 3 覆盖第 9..11 行，共 3 行白色像素
    assert!((output.as_array()[[0, 3]] - 3.0 * 28.0).abs() < 1e-3);
}

#[test]
fn test_session_invocations_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let input = ImagePreprocessor::load(&write_band_image(dir.path(), 5)).unwrap();

    let mut model = DigitModel::load(&fixture("band_classifier.onnx"), &onnx_config()).unwrap();
    let first = model.invoke(&input).unwrap();
    for _ in 0..10 {
        let next = model.invoke(&input).unwrap();
        assert!(first.max_abs_diff(&next).unwrap() <= 1e-6);
    }
}

#[test]
fn test_benchmark_with_onnx_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_band_image(dir.path(), 7);

    let model = DigitModel::load(&fixture("band_classifier.onnx"), &onnx_config()).unwrap();
    let settings = BenchSettings::new(2, 20, 10).unwrap();
    let report = BenchPipeline::run_with_engine(model, &path, settings).unwrap();

    assert_eq!(report.predicted, 7);
    assert_eq!(report.timed_runs, 20);
    assert!(report.average_ms >= 0.0);
}

#[test]
fn test_unthreaded_default_session_loads() {
    let config = OnnxConfig {
        intra_threads: None,
        optimization_level: 0,
    };
    assert!(DigitModel::load(&fixture("band_classifier.onnx"), &config).is_ok());
}

#[test]
fn test_model_with_other_input_size_is_rejected_at_load() {
    let err = DigitModel::load(&fixture("small_input.onnx"), &onnx_config())
        .err()
        .unwrap();

    assert!(matches!(err, BenchError::ModelLoad(_)));
    assert!(err.to_string().contains("14"), "{}", err);
}
