pub mod base_effect;
pub mod buffer;
pub mod channel_effect;
pub mod colour_space;
pub mod filter_effect;

pub use buffer::{Pixel, PixelBuffer};

pub type PixelEffectResult<T> = Result<T, PixelEffectError>;

#[derive(thiserror::Error, Debug)]
pub enum PixelEffectError {
    #[error("pixel ({x}, {y}) is out of bounds for a {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("pixel data length {len} does not match {width}x{height}")]
    DimensionMismatch { width: u32, height: u32, len: usize },
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A pure, stateless pixel transform.
///
/// Every effect in this crate is a per-pixel kernel: each output pixel is
/// computed from the corresponding input pixel alone, so effects are safe to
/// share across concurrent invocations and `apply` never fails.
pub trait Effect {
    fn transform(&self, pixel: Pixel) -> Pixel;

    /// Apply the kernel to a whole buffer, allocating a fresh output of
    /// identical dimensions. The input is never mutated.
    fn apply(&self, input: &PixelBuffer) -> PixelBuffer {
        input.map(|pixel| self.transform(pixel))
    }
}

#[derive(Debug, Clone)]
pub enum PixelEffect {
    Grayscale(base_effect::GrayscaleConfig),
    Invert,
    Saturation(base_effect::SaturationConfig),
    Sepia(filter_effect::SepiaConfig),
    ChannelIsolate(channel_effect::ChannelIsolateConfig),
}

impl PixelEffect {
    pub fn name(&self) -> &'static str {
        match self {
            PixelEffect::Grayscale(_) => "Grayscale",
            PixelEffect::Invert => "Invert",
            PixelEffect::Saturation(_) => "Saturation",
            PixelEffect::Sepia(_) => "Sepia",
            PixelEffect::ChannelIsolate(_) => "Channel Isolate",
        }
    }
}

impl Effect for PixelEffect {
    fn transform(&self, pixel: Pixel) -> Pixel {
        match self {
            PixelEffect::Grayscale(config) => config.transform(pixel),
            PixelEffect::Invert => base_effect::invert(pixel),
            PixelEffect::Saturation(config) => config.transform(pixel),
            PixelEffect::Sepia(config) => config.transform(pixel),
            PixelEffect::ChannelIsolate(config) => config.transform(pixel),
        }
    }
}
