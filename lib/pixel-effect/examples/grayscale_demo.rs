/// Grayscale effect example
/// Demonstrates the truncating-average grayscale conversion

use image::ImageReader;
use pixel_effect::{Effect, PixelBuffer, PixelEffect, base_effect::GrayscaleConfig};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    // Load test image
    let img_path = Path::new("data/test.png");
    let img = ImageReader::open(img_path)?.decode()?.to_rgba8();
    let buffer = PixelBuffer::from_rgba8(&img);

    // Apply grayscale effect
    let effect = PixelEffect::Grayscale(GrayscaleConfig::new());
    let output = effect.apply(&buffer);

    output.to_rgba8().save(output_dir.join("grayscale_effect.png"))?;

    println!("✓ Grayscale effect applied successfully!");
    println!("  Effect:   tmp/grayscale_effect.png");

    Ok(())
}
