use crate::{
    Effect, Pixel,
    colour_space::{hsb_to_rgb, rgb_to_hsb},
};
use derivative::Derivative;
use derive_setters::Setters;

/// Invert the color channels of a pixel. The result is forced opaque.
pub fn invert(pixel: Pixel) -> Pixel {
    Pixel::opaque(255 - pixel.r, 255 - pixel.g, 255 - pixel.b)
}

/// Grayscale effect configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GrayscaleConfig {
    #[derivative(Default(value = "GrayscaleMode::Average"))]
    mode: GrayscaleMode,
}

impl GrayscaleConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum GrayscaleMode {
    /// Truncating integer average `(r + g + b) / 3`.
    Average,
    /// Human perception weights: 0.299*R + 0.587*G + 0.114*B
    Luminance,
}

impl Effect for GrayscaleConfig {
    fn transform(&self, pixel: Pixel) -> Pixel {
        let gray = match self.mode {
            GrayscaleMode::Average => {
                ((pixel.r as u32 + pixel.g as u32 + pixel.b as u32) / 3) as u8
            }
            GrayscaleMode::Luminance => {
                (0.299 * pixel.r as f32 + 0.587 * pixel.g as f32 + 0.114 * pixel.b as f32) as u8
            }
        };

        Pixel::opaque(gray, gray, gray)
    }
}

/// Saturation adjustment configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SaturationConfig {
    /// Scale factor for the saturation channel, in [0.0, 2.0]. 1.0 leaves
    /// the image untouched, 0.0 fully desaturates.
    #[derivative(Default(value = "1.0"))]
    factor: f32,
}

impl SaturationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn factor(&self) -> f32 {
        self.factor.clamp(0.0, 2.0)
    }
}

impl Effect for SaturationConfig {
    fn transform(&self, pixel: Pixel) -> Pixel {
        let [h, s, v] = rgb_to_hsb(pixel.r, pixel.g, pixel.b);
        let s = (s * self.factor()).min(1.0);
        let (r, g, b) = hsb_to_rgb(h, s, v);

        Pixel::new(pixel.a, r, g, b)
    }
}
