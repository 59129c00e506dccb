// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the trees and the grid.

/// Failure reported by the fallible (`try_*`) entry points.
///
/// The infallible counterparts (`update`, `query_buffered`) treat these as
/// contract violations and panic with the same message.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpatialError {
    /// The geometry lies outside the index's world bounds.
    #[error("geometry lies outside the index bounds")]
    OutOfBounds,
    /// No entry with this key was found at the supplied geometry.
    #[error("no entry for this key at the supplied geometry")]
    NotFound,
    /// A buffered grid query gathered more keys than the configured maximum.
    #[error("query gathered more than {capacity} results")]
    CapacityExceeded {
        /// The configured `max_results` of the grid.
        capacity: usize,
    },
}
