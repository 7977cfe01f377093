//! Feature-map view and pooled-output buffer types.
//!
//! The pooling core reads a borrowed, channel-planar `FeatureMap` and writes
//! a freshly allocated `PooledMap`. Both use the same layout: one contiguous
//! row-major plane per channel, channels stored back to back.

use crate::error::Error;

/// Feature-map dimensions: width, height, and number of channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MapDimensions {
    /// Plane width in pixels
    pub width: usize,
    /// Plane height in pixels
    pub height: usize,
    /// Number of channels
    pub channels: usize,
}

impl MapDimensions {
    pub fn new(width: usize, height: usize, channels: usize) -> Self {
        assert!(width > 0, "Width must be positive");
        assert!(height > 0, "Height must be positive");
        assert!(channels > 0, "Channels must be positive");
        Self {
            width,
            height,
            channels,
        }
    }

    /// Total number of elements (width * height * channels).
    #[inline]
    pub fn element_count(&self) -> usize {
        self.width * self.height * self.channels
    }

    /// Number of elements in one channel plane.
    #[inline]
    pub fn plane_len(&self) -> usize {
        self.width * self.height
    }
}

/// Borrowed, read-only view of a channel-planar feature map.
///
/// The caller owns the pixel data; the pooling core only reads it.
#[derive(Debug, Clone, Copy)]
pub struct FeatureMap<'a> {
    data: &'a [f32],
    dims: MapDimensions,
}

impl<'a> FeatureMap<'a> {
    /// Wrap a planar pixel buffer.
    ///
    /// `data` must hold exactly `channels * height * width` elements,
    /// channel-major, row-major within each channel.
    pub fn new(data: &'a [f32], dims: MapDimensions) -> Self {
        assert_eq!(
            data.len(),
            dims.element_count(),
            "data length must equal width * height * channels"
        );
        Self { data, dims }
    }

    #[inline]
    pub fn dims(&self) -> MapDimensions {
        self.dims
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dims.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dims.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.dims.channels
    }

    /// One channel's row-major plane.
    #[inline]
    pub fn channel(&self, c: usize) -> &'a [f32] {
        debug_assert!(c < self.dims.channels, "channel index out of bounds");
        let plane = self.dims.plane_len();
        &self.data[c * plane..(c + 1) * plane]
    }
}

/// Owned pooled output of shape (channels, pooled_height, pooled_width).
///
/// Freshly allocated per call and fully overwritten before being returned;
/// never accumulated into across calls.
#[derive(Debug, Clone)]
pub struct PooledMap {
    pixels: Vec<f32>,
    dims: MapDimensions,
}

impl PooledMap {
    /// Allocate a zeroed pooled buffer, reporting allocation failure
    /// instead of aborting.
    pub(crate) fn try_new(dims: MapDimensions) -> Result<Self, Error> {
        let required = dims.element_count();
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(required)
            .map_err(|source| Error::Allocation { required, source })?;
        pixels.resize(required, 0.0);
        Ok(Self { pixels, dims })
    }

    #[inline]
    pub fn dims(&self) -> MapDimensions {
        self.dims
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dims.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dims.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.dims.channels
    }

    /// One channel's row-major plane.
    #[inline]
    pub fn channel(&self, c: usize) -> &[f32] {
        debug_assert!(c < self.dims.channels, "channel index out of bounds");
        let plane = self.dims.plane_len();
        &self.pixels[c * plane..(c + 1) * plane]
    }

    /// Pooled value at `(c, ph, pw)`.
    #[inline]
    pub fn get(&self, c: usize, ph: usize, pw: usize) -> f32 {
        debug_assert!(ph < self.dims.height && pw < self.dims.width);
        self.channel(c)[ph * self.dims.width + pw]
    }

    #[inline]
    pub fn pixels(&self) -> &[f32] {
        &self.pixels
    }

    #[inline]
    pub(crate) fn pixels_mut(&mut self) -> &mut [f32] {
        &mut self.pixels
    }

    #[inline]
    pub fn into_pixels(self) -> Vec<f32> {
        self.pixels
    }
}
