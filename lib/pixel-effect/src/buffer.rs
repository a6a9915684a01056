use crate::{PixelEffectError, PixelEffectResult};
use image::{Rgba, RgbaImage};

/// A 4-channel color value, 8 bits per channel.
///
/// The packed representation is `0xAARRGGBB`, matching the wire format the
/// rest of the pipeline uses for pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { a: 0xff, r, g, b }
    }

    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

impl From<Rgba<u8>> for Pixel {
    fn from(rgba: Rgba<u8>) -> Self {
        Self {
            r: rgba[0],
            g: rgba[1],
            b: rgba[2],
            a: rgba[3],
        }
    }
}

impl From<Pixel> for Rgba<u8> {
    fn from(pixel: Pixel) -> Self {
        Rgba([pixel.r, pixel.g, pixel.b, pixel.a])
    }
}

/// Owned width x height pixel storage, addressed by `(x, y)` in row-major
/// order.
///
/// A buffer is never resized in place; effects that need a new shape produce
/// a new buffer. There is no concurrency contract here: a buffer belongs to
/// exactly one owner at a time and is handed over wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<Pixel>,
}

impl PixelBuffer {
    /// Create a buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![Pixel::default(); (width as usize) * (height as usize)],
        }
    }

    /// Build a buffer from row-major pixel data.
    pub fn from_pixels(width: u32, height: u32, data: Vec<Pixel>) -> PixelEffectResult<Self> {
        if data.len() != (width as usize) * (height as usize) {
            return Err(PixelEffectError::DimensionMismatch {
                width,
                height,
                len: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn index(&self, x: u32, y: u32) -> PixelEffectResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(PixelEffectError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        Ok((y as usize) * (self.width as usize) + x as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> PixelEffectResult<Pixel> {
        Ok(self.data[self.index(x, y)?])
    }

    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> PixelEffectResult<()> {
        let index = self.index(x, y)?;
        self.data[index] = pixel;
        Ok(())
    }

    /// The pixels of row `y`, left to right. `None` when `y` is out of range.
    pub fn row(&self, y: u32) -> Option<&[Pixel]> {
        if y >= self.height {
            return None;
        }

        let start = (y as usize) * (self.width as usize);
        Some(&self.data[start..start + self.width as usize])
    }

    /// All pixels in row-major order (top-to-bottom, left-to-right).
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.data.iter().copied()
    }

    /// A fresh same-dimension buffer with `f` applied to every pixel.
    pub fn map(&self, f: impl Fn(Pixel) -> Pixel) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&pixel| f(pixel)).collect(),
        }
    }

    pub fn from_rgba8(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: image.pixels().map(|&rgba| Pixel::from(rgba)).collect(),
        }
    }

    pub fn to_rgba8(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width, self.height);
        for (pixel, rgba) in self.data.iter().zip(image.pixels_mut()) {
            *rgba = Rgba::from(*pixel);
        }
        image
    }
}
