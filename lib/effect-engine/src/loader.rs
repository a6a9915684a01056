use image::ImageReader;
use pixel_effect::PixelBuffer;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("unsupported image format")]
    UnsupportedFormat,

    #[error("I/O failure: {0}")]
    IoFailure(#[from] std::io::Error),

    #[error("corrupt image data: {0}")]
    Corrupt(String),
}

impl From<image::ImageError> for DecodeError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(_) => DecodeError::UnsupportedFormat,
            image::ImageError::IoError(err) => DecodeError::IoFailure(err),
            other => DecodeError::Corrupt(other.to_string()),
        }
    }
}

/// Decode an image file into a [`PixelBuffer`].
///
/// Blocks on file I/O, so the dispatcher always runs it off the UI thread.
pub fn decode(path: &Path) -> Result<PixelBuffer, DecodeError> {
    let image = ImageReader::open(path)
        .map_err(DecodeError::IoFailure)?
        .with_guessed_format()
        .map_err(DecodeError::IoFailure)?
        .decode()?;

    Ok(PixelBuffer::from_rgba8(&image.to_rgba8()))
}
