//! Error types for boxmerge.

use thiserror::Error;

/// Result alias for boxmerge operations.
pub type BoxMergeResult<T> = std::result::Result<T, BoxMergeError>;

/// Errors reported by the collector and the box geometry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoxMergeError {
    /// A class bucket is already holding its configured maximum of raw
    /// boxes.
    #[error("class {class_id} already holds {capacity} boxes")]
    CapacityExceeded { class_id: i32, capacity: usize },
    /// A not-yet-seen class id arrived after the distinct-class bound was
    /// reached.
    #[error("cannot open a bucket for class {class_id}: {max_classes} classes already tracked")]
    TooManyClasses { class_id: i32, max_classes: usize },
    /// Both boxes are inverted, leaving IoU without a positive denominator.
    #[error("degenerate boxes: combined area {denominator} leaves IoU undefined")]
    DegenerateBox { denominator: i64 },
}
