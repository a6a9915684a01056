use crate::{Effect, Pixel};
use derivative::Derivative;
use derive_setters::Setters;

/// Sepia tone configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SepiaConfig {
    /// Blend between the original pixel (0.0) and the full sepia tone (1.0).
    #[derivative(Default(value = "1.0"))]
    intensity: f32,
}

impl SepiaConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for SepiaConfig {
    fn transform(&self, pixel: Pixel) -> Pixel {
        let r = pixel.r as f32;
        let g = pixel.g as f32;
        let b = pixel.b as f32;

        // Sepia tone transformation. The coefficients are all non-negative,
        // so the lower clamp never fires in practice; it is kept anyway and
        // asserted by tests rather than assumed.
        let tr = (0.393 * r + 0.769 * g + 0.189 * b).clamp(0.0, 255.0);
        let tg = (0.349 * r + 0.686 * g + 0.168 * b).clamp(0.0, 255.0);
        let tb = (0.272 * r + 0.534 * g + 0.131 * b).clamp(0.0, 255.0);

        let intensity = self.intensity.clamp(0.0, 1.0);
        Pixel::opaque(
            (r * (1.0 - intensity) + tr * intensity) as u8,
            (g * (1.0 - intensity) + tg * intensity) as u8,
            (b * (1.0 - intensity) + tb * intensity) as u8,
        )
    }
}
