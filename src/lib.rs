//! BoxMerge filters raw object-detection output down to one box per object.
//!
//! Candidates accumulate into per-class buckets with fixed bounds, each
//! bucket is sorted by descending confidence and greedily merged into
//! cluster representatives under an integer IoU threshold, and survivors
//! stream through a caller-supplied [`DetectionSink`]. The whole pass is
//! synchronous and allocation-bounded, sized for the post-processing stage
//! of a real-time detection loop.
//!
//! ```
//! use boxmerge::{BoundingBox, Suppressor};
//!
//! let mut session = Suppressor::new();
//! session.submit(BoundingBox::new(0, 0, 10, 10, 90, 1))?;
//! session.submit(BoundingBox::new(1, 1, 11, 11, 80, 1))?;
//!
//! let mut survivors = Vec::new();
//! session.run(50, &mut survivors);
//! assert_eq!(survivors, [BoundingBox::new(0, 0, 11, 11, 90, 1)]);
//! # Ok::<(), boxmerge::BoxMergeError>(())
//! ```

mod cluster;
pub mod geometry;
mod session;
mod sink;
mod trace;
pub mod util;

pub use cluster::merge_overlapping;
pub use geometry::BoundingBox;
pub use session::{SuppressConfig, Suppressor};
pub use sink::DetectionSink;
pub use util::{BoxMergeError, BoxMergeResult};
