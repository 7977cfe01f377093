//! Weighted reduction engine: replay the sampling plan per channel.

use rayon::prelude::*;

use crate::feature_map::{FeatureMap, PooledMap};
use crate::roi::RoiGeometry;
use crate::sampling::BilinearStencil;

/// Pool every channel of `input` into `output` using the shared plan.
///
/// Channels fan out over rayon: the plan is read-only and each channel
/// owns a disjoint `&mut` output plane, so no locking is needed and the
/// summation order inside a cell is fixed. The result is bit-identical
/// for any worker count, including a single thread.
pub(crate) fn pool_channels(
    input: &FeatureMap<'_>,
    plan: &[BilinearStencil],
    geom: &RoiGeometry,
    output: &mut PooledMap,
) {
    let pooled_width = output.width();
    let pooled_height = output.height();
    let plane_len = pooled_width * pooled_height;
    let samples_per_bin = geom.samples_per_bin();
    let count = samples_per_bin as f32;

    debug_assert_eq!(plan.len(), plane_len * geom.grid_h * geom.grid_w);
    debug_assert_eq!(input.channels(), output.channels());

    output
        .pixels_mut()
        .par_chunks_mut(plane_len)
        .enumerate()
        .for_each(|(c, out_plane)| {
            let src = input.channel(c);
            let mut cursor = 0;

            for ph in 0..pooled_height {
                let row = &mut out_plane[ph * pooled_width..(ph + 1) * pooled_width];
                for cell in row.iter_mut() {
                    let mut acc = 0.0f32;
                    for stencil in &plan[cursor..cursor + samples_per_bin] {
                        acc += stencil.w[0] * src[stencil.pos[0]]
                            + stencil.w[1] * src[stencil.pos[1]]
                            + stencil.w[2] * src[stencil.pos[2]]
                            + stencil.w[3] * src[stencil.pos[3]];
                    }
                    *cell = acc / count;
                    cursor += samples_per_bin;
                }
            }
        });
}
