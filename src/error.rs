//! Error types for ROIAlign pooling.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur during a pooling call.
///
/// Allocation failure is the only recoverable condition on this path.
/// Degenerate ROIs and out-of-range coordinates are absorbed by the
/// clamping rules and never surface as errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to allocate {required} elements for pooling buffers: {source}")]
    Allocation {
        required: usize,
        #[source]
        source: TryReserveError,
    },
}
