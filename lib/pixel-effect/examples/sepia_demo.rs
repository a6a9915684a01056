/// Sepia tone effect example
/// Demonstrates vintage sepia effect

use image::ImageReader;
use pixel_effect::{Effect, PixelBuffer, PixelEffect, filter_effect::SepiaConfig};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    // Load test image
    let img_path = Path::new("data/test.png");
    let img = ImageReader::open(img_path)?.decode()?.to_rgba8();
    let buffer = PixelBuffer::from_rgba8(&img);

    // Apply sepia effect
    let effect = PixelEffect::Sepia(SepiaConfig::new());
    let output = effect.apply(&buffer);

    output.to_rgba8().save(output_dir.join("sepia_effect.png"))?;

    println!("✓ Sepia effect applied successfully!");
    println!("  Effect:   tmp/sepia_effect.png");

    Ok(())
}
