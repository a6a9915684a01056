/// Dispatcher walk-through
/// Loads an image in the background, applies effects one at a time,
/// demonstrates busy rejection and cancellation.

use anyhow::{Result, bail};
use effect_engine::{Dispatcher, DispatcherConfig, UiEvent};
use image::{Rgba, RgbaImage};
use pixel_effect::{
    PixelEffect, base_effect::GrayscaleConfig, base_effect::SaturationConfig,
    filter_effect::SepiaConfig,
};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    // Generate a gradient test image to load.
    let img_path = output_dir.join("input.png");
    let mut img = RgbaImage::new(800, 600);
    for y in 0..600 {
        for x in 0..800 {
            let r = (x * 255 / 800) as u8;
            let g = (y * 255 / 600) as u8;
            let b = ((x + y) * 255 / 1400) as u8;
            img.put_pixel(x, y, Rgba([r, g, b, 255]));
        }
    }
    img.save(&img_path)?;

    let (dispatcher, events) = Dispatcher::new(DispatcherConfig::new());

    // Decode happens off this thread; we block on the event for demo
    // purposes only.
    dispatcher.request_load(&img_path);
    match events.recv()? {
        UiEvent::ImageReady(buffer) => {
            println!("✓ Loaded {}x{}", buffer.width(), buffer.height())
        }
        UiEvent::LoadFailed(reason) => bail!("load failed: {reason}"),
        other => bail!("unexpected event: {other:?}"),
    }

    let effects = [
        PixelEffect::Grayscale(GrayscaleConfig::new()),
        PixelEffect::Sepia(SepiaConfig::new()),
        PixelEffect::Saturation(SaturationConfig::new().with_factor(1.8)),
    ];

    for effect in effects {
        let name = effect.name();

        // A second request while one is running is rejected, never raced.
        dispatcher.request_effect(effect)?;
        if dispatcher
            .request_effect(PixelEffect::Invert)
            .is_err()
        {
            println!("  (second request while {name} runs: busy, as expected)");
        }

        loop {
            match events.recv()? {
                UiEvent::EffectCompleted(buffer) => {
                    let file = format!("{}.png", name.to_lowercase().replace(' ', "_"));
                    buffer.to_rgba8().save(output_dir.join(&file))?;
                    println!("✓ {name} committed: tmp/{file}");
                    break;
                }
                UiEvent::EffectRejectedBusy => continue,
                other => bail!("unexpected event: {other:?}"),
            }
        }
    }

    // Cancellation: start a job and abandon it. The current image stays
    // exactly as it was.
    dispatcher.request_effect(PixelEffect::Invert)?;
    dispatcher.request_cancel();
    match events.recv()? {
        UiEvent::EffectCancelled => println!("✓ Invert cancelled, image unchanged"),
        UiEvent::EffectCompleted(_) => println!("  (invert finished before the cancel landed)"),
        other => bail!("unexpected event: {other:?}"),
    }

    dispatcher.join();
    Ok(())
}
