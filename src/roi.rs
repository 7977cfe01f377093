//! ROI box representation and per-call derived geometry.

use crate::config::RoiAlignConfig;

/// Rectangular region of interest in original-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RoiBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl RoiBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Read one ROI from a raw record buffer.
    ///
    /// Only the first four elements `(x1, y1, x2, y2)` are consulted;
    /// trailing fields such as a batch index are ignored. One record per
    /// call - callers holding multi-ROI buffers iterate records themselves.
    pub fn from_record(record: &[f32]) -> Self {
        assert!(record.len() >= 4, "ROI record must hold at least 4 values");
        Self {
            x1: record[0],
            y1: record[1],
            x2: record[2],
            y2: record[3],
        }
    }
}

/// Quantities derived from one ROI and the pooling configuration, feeding
/// both the sampling-plan builder and the reduction engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiGeometry {
    /// ROI top edge in feature-map coordinates.
    pub start_h: f32,
    /// ROI left edge in feature-map coordinates.
    pub start_w: f32,
    /// Height of one output bin in feature-map pixels.
    pub bin_size_h: f32,
    /// Width of one output bin in feature-map pixels.
    pub bin_size_w: f32,
    /// Sub-samples per bin along y.
    pub grid_h: usize,
    /// Sub-samples per bin along x.
    pub grid_w: usize,
}

impl RoiGeometry {
    /// Map an ROI into feature-map space and derive the sampling layout.
    ///
    /// With `aligned` a half-pixel offset shifts coordinates to pixel
    /// centers; without it, ROI extents are clamped to at least one
    /// feature-map cell so a legacy ROI never shrinks below one bin of
    /// source data.
    pub fn compute(roi: RoiBox, config: &RoiAlignConfig) -> Self {
        let offset = if config.aligned { 0.5 } else { 0.0 };

        let start_w = roi.x1 * config.spatial_scale - offset;
        let start_h = roi.y1 * config.spatial_scale - offset;
        let end_w = roi.x2 * config.spatial_scale - offset;
        let end_h = roi.y2 * config.spatial_scale - offset;

        let mut roi_width = end_w - start_w;
        let mut roi_height = end_h - start_h;

        if !config.aligned {
            roi_width = roi_width.max(1.0);
            roi_height = roi_height.max(1.0);
        }

        let bin_size_w = roi_width / config.pooled_width as f32;
        let bin_size_h = roi_height / config.pooled_height as f32;

        // Adaptive density: one sample per feature-map pixel covered by the
        // bin, never fewer than one sample per bin.
        let (grid_h, grid_w) = if config.sampling_ratio > 0 {
            (config.sampling_ratio as usize, config.sampling_ratio as usize)
        } else {
            (
                ((roi_height / config.pooled_height as f32).ceil() as usize).max(1),
                ((roi_width / config.pooled_width as f32).ceil() as usize).max(1),
            )
        };

        Self {
            start_h,
            start_w,
            bin_size_h,
            bin_size_w,
            grid_h,
            grid_w,
        }
    }

    /// Samples per output bin.
    #[inline]
    pub fn samples_per_bin(&self) -> usize {
        (self.grid_h * self.grid_w).max(1)
    }
}
