use std::path::Path;

use image::{Rgba, RgbaImage};
use image_compare::Algorithm;

use crate::{Result, VisualTestError};

/// Result of comparing two images
pub struct CompareResult {
    /// Similarity score from 0.0 to 1.0
    pub similarity: f64,
}

/// Compare two frames using SSIM
pub fn compare_images(expected: &RgbaImage, captured: &RgbaImage) -> Result<CompareResult> {
    if expected.dimensions() != captured.dimensions() {
        return Err(VisualTestError::Compare(format!(
            "Image dimensions don't match: expected {:?} vs captured {:?}",
            expected.dimensions(),
            captured.dimensions()
        )));
    }

    // SSIM works on RGB; frames are fully opaque anyway
    let expected_rgb = image::DynamicImage::ImageRgba8(expected.clone()).to_rgb8();
    let captured_rgb = image::DynamicImage::ImageRgba8(captured.clone()).to_rgb8();

    let result = image_compare::rgb_similarity_structure(
        &Algorithm::MSSIMSimple,
        &expected_rgb,
        &captured_rgb,
    )
    .map_err(|e| VisualTestError::Compare(format!("SSIM comparison failed: {}", e)))?;

    Ok(CompareResult {
        similarity: result.score,
    })
}

/// Write an image highlighting differences between two frames
pub fn generate_diff_image(expected: &RgbaImage, captured: &RgbaImage, output: &Path) -> Result<()> {
    let (width, height) = expected.dimensions();
    let diff_img = RgbaImage::from_fn(width, height, |x, y| {
        let expected_pixel = expected.get_pixel(x, y);
        let captured_pixel = captured.get_pixel(x, y);
        let diff = pixel_difference(expected_pixel, captured_pixel);

        if diff > 10 {
            // Highlight differences in red
            let intensity = (diff as f32 / 255.0 * 200.0 + 55.0) as u8;
            Rgba([intensity, 0, 0, 255])
        } else {
            // Dim everything that matches
            Rgba([
                captured_pixel[0] / 3,
                captured_pixel[1] / 3,
                captured_pixel[2] / 3,
                255,
            ])
        }
    });

    diff_img.save(output)?;
    Ok(())
}

/// Calculate the maximum channel difference between two pixels
fn pixel_difference(a: &Rgba<u8>, b: &Rgba<u8>) -> u8 {
    let dr = a[0].abs_diff(b[0]);
    let dg = a[1].abs_diff(b[1]);
    let db = a[2].abs_diff(b[2]);
    dr.max(dg).max(db)
}
