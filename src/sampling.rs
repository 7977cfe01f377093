//! Sampling-plan builder: per-sample bilinear stencils for one ROI.
//!
//! The expensive coordinate math is done once here, before any per-channel
//! work. The reduction engine then replays the plan against every channel
//! plane, so building the plan is O(samples) while pooling is
//! O(channels * samples).

use crate::error::Error;
use crate::roi::RoiGeometry;

/// Bilinear interpolation stencil for one sample point.
///
/// Holds the four nearest grid positions as flat offsets into a channel
/// plane, plus their blending weights. Weights of a live stencil are
/// non-negative and sum to 1.0; [`BilinearStencil::EMPTY`] marks samples
/// outside the feature map and contributes nothing to the sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BilinearStencil {
    /// Top-left, top-right, bottom-left, bottom-right plane offsets.
    pub pos: [usize; 4],
    /// Matching bilinear weights.
    pub w: [f32; 4],
}

impl BilinearStencil {
    /// Sentinel for sample points outside the feature map. Contributes
    /// zero to the cell sum but still counts toward the averaging divisor.
    pub const EMPTY: Self = Self {
        pos: [0; 4],
        w: [0.0; 4],
    };
}

/// Build the full stencil sequence for one ROI.
///
/// Stencils are emitted in row-major `(ph, pw, iy, ix)` order: all samples
/// of output cell `(0, 0)` first, then cell `(0, 1)`, and so on. The
/// reduction engine consumes them with a cursor and relies on exactly this
/// ordering.
///
/// Sample points more than one pixel outside the feature map produce the
/// empty sentinel; points within the one-pixel overshoot band are clamped
/// onto the nearest edge pixel. The emitted offsets always address pixels
/// inside `[0, height) x [0, width)`.
pub fn build_sampling_plan(
    height: usize,
    width: usize,
    pooled_height: usize,
    pooled_width: usize,
    geom: &RoiGeometry,
) -> Result<Vec<BilinearStencil>, Error> {
    debug_assert!(height > 0 && width > 0, "feature map must be non-empty");

    let required = pooled_height * pooled_width * geom.grid_h * geom.grid_w;
    let mut plan = Vec::new();
    plan.try_reserve_exact(required)
        .map_err(|source| Error::Allocation { required, source })?;

    for ph in 0..pooled_height {
        for pw in 0..pooled_width {
            for iy in 0..geom.grid_h {
                let yy = geom.start_h
                    + ph as f32 * geom.bin_size_h
                    + (iy as f32 + 0.5) * geom.bin_size_h / geom.grid_h as f32;
                for ix in 0..geom.grid_w {
                    let xx = geom.start_w
                        + pw as f32 * geom.bin_size_w
                        + (ix as f32 + 0.5) * geom.bin_size_w / geom.grid_w as f32;

                    plan.push(stencil_at(yy, xx, height, width));
                }
            }
        }
    }

    debug_assert_eq!(plan.len(), required);
    Ok(plan)
}

/// Stencil for one continuous sample coordinate.
#[inline]
fn stencil_at(y: f32, x: f32, height: usize, width: usize) -> BilinearStencil {
    // Up to one pixel of overshoot is edge-clamped below; beyond that the
    // sample is outside the valid region entirely.
    if y < -1.0 || y > height as f32 || x < -1.0 || x > width as f32 {
        return BilinearStencil::EMPTY;
    }

    let mut y = y.max(0.0);
    let mut x = x.max(0.0);

    let mut y_low = y as usize;
    let mut x_low = x as usize;

    let y_high = if y_low >= height - 1 {
        y_low = height - 1;
        y = y_low as f32;
        y_low
    } else {
        y_low + 1
    };

    let x_high = if x_low >= width - 1 {
        x_low = width - 1;
        x = x_low as f32;
        x_low
    } else {
        x_low + 1
    };

    let ly = y - y_low as f32;
    let lx = x - x_low as f32;
    let hy = 1.0 - ly;
    let hx = 1.0 - lx;

    BilinearStencil {
        pos: [
            y_low * width + x_low,
            y_low * width + x_high,
            y_high * width + x_low,
            y_high * width + x_high,
        ],
        w: [hy * hx, hy * lx, ly * hx, ly * lx],
    }
}
