//! Channel isolation effects
//!
//! Keeps a single color channel and zeroes everything else, reproducing the
//! classic "blue filter": the suppressed channels and the alpha channel are
//! both written as zero.

use crate::{Effect, Pixel};
use derivative::Derivative;
use derive_setters::Setters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// Channel isolation effect configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ChannelIsolateConfig {
    #[derivative(Default(value = "Channel::Blue"))]
    channel: Channel,
}

impl ChannelIsolateConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Effect for ChannelIsolateConfig {
    fn transform(&self, pixel: Pixel) -> Pixel {
        match self.channel {
            Channel::Red => Pixel::new(0, pixel.r, 0, 0),
            Channel::Green => Pixel::new(0, 0, pixel.g, 0),
            Channel::Blue => Pixel::new(0, 0, 0, pixel.b),
        }
    }
}
