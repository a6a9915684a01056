/// Saturation adjustment example
/// Demonstrates desaturated, identity and boosted saturation

use image::ImageReader;
use pixel_effect::{Effect, PixelBuffer, base_effect::SaturationConfig};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    // Load test image
    let img_path = Path::new("data/test.png");
    let img = ImageReader::open(img_path)?.decode()?.to_rgba8();
    let buffer = PixelBuffer::from_rgba8(&img);

    for (factor, name) in [
        (0.0, "saturation_0.png"),
        (0.5, "saturation_0_5.png"),
        (2.0, "saturation_2.png"),
    ] {
        let effect = SaturationConfig::new().with_factor(factor);
        let output = effect.apply(&buffer);
        output.to_rgba8().save(output_dir.join(name))?;
        println!("✓ Saturation x{factor} applied: tmp/{name}");
    }

    Ok(())
}
