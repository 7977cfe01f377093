//! ROIAlign forward pooling.
//!
//! Given a channel-planar feature map and one rectangular region of
//! interest in image coordinates, this crate produces a fixed-size pooled
//! feature map by bilinearly sampling a regular grid of sub-points inside
//! the ROI and averaging them into each output cell. Unlike truncating ROI
//! pooling, sample coordinates keep their sub-pixel precision, which is
//! what two-stage detectors (Faster/Mask R-CNN style) rely on.
//!
//! The work splits into two passes:
//! - a sampling plan of bilinear stencils, built once per ROI
//!   ([`BilinearStencil`], [`build_sampling_plan`]);
//! - a weighted reduction replaying that plan against every channel in
//!   parallel.
//!
//! # Quick Start
//!
//! ```rust
//! use roialign::{roi_align, ExecOptions, FeatureMap, MapDimensions, RoiAlignConfig, RoiBox};
//!
//! let pixels = vec![1.0f32; 4 * 4];
//! let features = FeatureMap::new(&pixels, MapDimensions::new(4, 4, 1));
//!
//! let config = RoiAlignConfig::new(2, 2).with_sampling_ratio(2);
//! let pooled = roi_align(
//!     &features,
//!     RoiBox::new(0.0, 0.0, 4.0, 4.0),
//!     &config,
//!     &ExecOptions::default(),
//! )
//! .unwrap();
//!
//! assert_eq!(pooled.dims(), MapDimensions::new(2, 2, 1));
//! ```

mod config;
mod error;
mod feature_map;
mod reduce;
mod roi;
mod sampling;

#[cfg(test)]
pub(crate) mod testing;


pub use config::{ExecOptions, RoiAlignConfig};
pub use error::Error;
pub use feature_map::{FeatureMap, MapDimensions, PooledMap};
pub use roi::{RoiBox, RoiGeometry};
pub use sampling::{build_sampling_plan, BilinearStencil};

/// Pool one ROI from a feature map into a fixed-size output.
///
/// The ROI box is given in original-image coordinates and mapped into
/// feature-map space by `config.spatial_scale`. The output has shape
/// `(channels, pooled_height, pooled_width)` and is freshly allocated per
/// call; [`Error::Allocation`] is returned if that allocation fails, with
/// no partial output.
///
/// ROIs overhanging the feature map are not an error: samples within one
/// pixel of an edge are clamped onto it, samples further out contribute
/// zero while still counting toward the per-cell average.
///
/// `opts.num_threads` bounds the per-channel fan-out; the result does not
/// depend on it.
pub fn roi_align(
    input: &FeatureMap<'_>,
    roi: RoiBox,
    config: &RoiAlignConfig,
    opts: &ExecOptions,
) -> Result<PooledMap, Error> {
    config.validate();

    let geom = RoiGeometry::compute(roi, config);
    tracing::debug!(
        ?roi,
        start_h = geom.start_h,
        start_w = geom.start_w,
        bin_size_h = geom.bin_size_h,
        bin_size_w = geom.bin_size_w,
        grid_h = geom.grid_h,
        grid_w = geom.grid_w,
        "computed ROI geometry"
    );

    // Plan and output are the only per-call allocations; both happen
    // before any compute so a failure leaves nothing half-written.
    let plan = build_sampling_plan(
        input.height(),
        input.width(),
        config.pooled_height,
        config.pooled_width,
        &geom,
    )?;
    let mut output = PooledMap::try_new(MapDimensions::new(
        config.pooled_width,
        config.pooled_height,
        input.channels(),
    ))?;

    if opts.num_threads > 0 {
        // Local pool bounds the fan-out without touching the global one.
        // Build failure falls back to the global pool; the output is the
        // same either way.
        match rayon::ThreadPoolBuilder::new()
            .num_threads(opts.num_threads)
            .build()
        {
            Ok(pool) => pool.install(|| reduce::pool_channels(input, &plan, &geom, &mut output)),
            Err(e) => {
                tracing::warn!("failed to build local thread pool: {e}");
                reduce::pool_channels(input, &plan, &geom, &mut output);
            }
        }
    } else {
        reduce::pool_channels(input, &plan, &geom, &mut output);
    }

    Ok(output)
}
