//! Configuration types for ROIAlign pooling.
//!
//! All configuration structs for the pooling pipeline are consolidated here.

// =============================================================================
// Pooling configuration
// =============================================================================

/// Configuration for ROIAlign pooling.
///
/// Read once per call and immutable afterward. The pooled grid size must be
/// positive; `validate()` asserts this precondition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiAlignConfig {
    /// Output grid width in cells.
    pub pooled_width: usize,
    /// Output grid height in cells.
    pub pooled_height: usize,
    /// Factor converting ROI coordinates from image space to feature-map
    /// space (typically the feature map's downsampling factor, e.g. 1/16).
    pub spatial_scale: f32,
    /// Number of sub-samples per output bin along each axis.
    /// `<= 0` derives the density adaptively from the bin size.
    pub sampling_ratio: i32,
    /// Apply a half-pixel offset so sample coordinates refer to pixel
    /// centers. When false, ROI extents are clamped to at least one
    /// feature-map cell (legacy behavior).
    pub aligned: bool,
}

impl RoiAlignConfig {
    /// Create a configuration for the given output grid size.
    pub fn new(pooled_width: usize, pooled_height: usize) -> Self {
        Self {
            pooled_width,
            pooled_height,
            ..Self::default()
        }
    }

    /// Set the spatial scale factor.
    pub fn with_spatial_scale(mut self, spatial_scale: f32) -> Self {
        self.spatial_scale = spatial_scale;
        self
    }

    /// Set the per-bin sampling ratio (`<= 0` = adaptive).
    pub fn with_sampling_ratio(mut self, sampling_ratio: i32) -> Self {
        self.sampling_ratio = sampling_ratio;
        self
    }

    /// Enable or disable the half-pixel alignment offset.
    pub fn with_aligned(mut self, aligned: bool) -> Self {
        self.aligned = aligned;
        self
    }

    /// Validate configuration parameters.
    ///
    /// Panics on a non-positive pooled grid. Invalid grids are a caller
    /// bug, not a runtime condition, so this is not a `Result`.
    pub fn validate(&self) {
        assert!(self.pooled_width > 0, "pooled_width must be positive");
        assert!(self.pooled_height > 0, "pooled_height must be positive");
    }
}

impl Default for RoiAlignConfig {
    fn default() -> Self {
        Self {
            pooled_width: 7,
            pooled_height: 7,
            spatial_scale: 1.0,
            sampling_ratio: 0,
            aligned: true,
        }
    }
}

// =============================================================================
// Execution options
// =============================================================================

/// Execution parameters for one pooling call.
///
/// Controls resources only, never results: the pooled output is
/// bit-identical for any `num_threads` value, including 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecOptions {
    /// Soft upper bound on worker threads for the per-channel fan-out.
    /// `0` uses the global rayon pool.
    pub num_threads: usize,
}

impl ExecOptions {
    /// Limit the per-channel fan-out to at most `num_threads` workers.
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = num_threads;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RoiAlignConfig::default();
        assert_eq!(config.pooled_width, 7);
        assert_eq!(config.pooled_height, 7);
        assert!((config.spatial_scale - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.sampling_ratio, 0);
        assert!(config.aligned);
    }

    #[test]
    fn test_config_builder() {
        let config = RoiAlignConfig::new(14, 7)
            .with_spatial_scale(0.0625)
            .with_sampling_ratio(2)
            .with_aligned(false);

        assert_eq!(config.pooled_width, 14);
        assert_eq!(config.pooled_height, 7);
        assert!((config.spatial_scale - 0.0625).abs() < f32::EPSILON);
        assert_eq!(config.sampling_ratio, 2);
        assert!(!config.aligned);
    }

    #[test]
    #[should_panic(expected = "pooled_width must be positive")]
    fn test_config_zero_width_panics() {
        RoiAlignConfig::new(0, 7).validate();
    }

    #[test]
    #[should_panic(expected = "pooled_height must be positive")]
    fn test_config_zero_height_panics() {
        RoiAlignConfig::new(7, 0).validate();
    }

    #[test]
    fn test_exec_options_default() {
        let opts = ExecOptions::default();
        assert_eq!(opts.num_threads, 0);
    }
}
