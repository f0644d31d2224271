mod capture;
mod compare;

pub use capture::{capture_scenario, CaptureConfig, Step};
pub use compare::{compare_images, generate_diff_image, CompareResult};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualTestError {
    #[error("Failed to render frame: {0}")]
    Render(#[from] bubble_button::Error),
    #[error("Failed to compare images: {0}")]
    Compare(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, VisualTestError>;

/// Two scenarios whose final frames should (or should not) match
#[derive(Clone)]
pub struct VisualTestConfig {
    pub name: String,
    pub expected: Vec<Step>,
    pub actual: Vec<Step>,
    /// Similarity threshold (0.0 to 1.0, default 0.999)
    pub similarity_threshold: f64,
}

impl VisualTestConfig {
    pub fn new(name: impl Into<String>, expected: Vec<Step>, actual: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            expected,
            actual,
            similarity_threshold: 0.999,
        }
    }
}

/// Result of a visual test
pub struct VisualTestResult {
    /// Whether the test passed (similarity >= threshold)
    pub passed: bool,
    /// The similarity score (0.0 to 1.0)
    pub similarity: f64,
    pub expected_path: PathBuf,
    pub captured_path: PathBuf,
    /// Path to diff image (if generated on failure)
    pub diff_path: Option<PathBuf>,
}

/// Get the path to the output directory for test artifacts
pub fn output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("output")
}

pub fn expected_path(name: &str) -> PathBuf {
    output_dir().join(format!("{}_expected.png", name))
}

pub fn captured_path(name: &str) -> PathBuf {
    output_dir().join(format!("{}_captured.png", name))
}

pub fn diff_path(name: &str) -> PathBuf {
    output_dir().join(format!("{}_diff.png", name))
}

/// Capture both scenarios and compare their final frames
pub fn run_visual_test(config: &VisualTestConfig) -> Result<VisualTestResult> {
    std::fs::create_dir_all(output_dir())?;

    let exp_path = expected_path(&config.name);
    let cap_path = captured_path(&config.name);

    let expected = capture_scenario(&CaptureConfig {
        output_path: Some(exp_path.clone()),
        ..CaptureConfig::new(format!("{}_expected", config.name), config.expected.clone())
    })?;
    let captured = capture_scenario(&CaptureConfig {
        output_path: Some(cap_path.clone()),
        ..CaptureConfig::new(format!("{}_captured", config.name), config.actual.clone())
    })?;

    let compare_result = compare_images(&expected, &captured)?;
    let passed = compare_result.similarity >= config.similarity_threshold;

    // Generate diff if failed
    let diff = if !passed {
        let diff_file = diff_path(&config.name);
        generate_diff_image(&expected, &captured, &diff_file)?;
        Some(diff_file)
    } else {
        None
    };

    Ok(VisualTestResult {
        passed,
        similarity: compare_result.similarity,
        expected_path: exp_path,
        captured_path: cap_path,
        diff_path: diff,
    })
}
