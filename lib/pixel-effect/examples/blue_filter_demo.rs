/// Blue channel isolation example
/// Demonstrates the single-channel color filter

use image::ImageReader;
use pixel_effect::{Effect, PixelBuffer, PixelEffect, channel_effect::ChannelIsolateConfig};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    // Load test image
    let img_path = Path::new("data/test.png");
    let img = ImageReader::open(img_path)?.decode()?.to_rgba8();
    let buffer = PixelBuffer::from_rgba8(&img);

    // Apply blue filter
    let effect = PixelEffect::ChannelIsolate(ChannelIsolateConfig::new());
    let output = effect.apply(&buffer);

    output.to_rgba8().save(output_dir.join("blue_filter_effect.png"))?;

    println!("✓ Blue filter applied successfully!");
    println!("  Effect:   tmp/blue_filter_effect.png");

    Ok(())
}
