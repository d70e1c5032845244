//! Per-frame collection and multi-class suppression dispatch.
//!
//! A [`Suppressor`] lives for one frame: every raw detection is submitted
//! up front, the suppression pass runs once (consuming the session), and
//! survivors stream out through a [`DetectionSink`]. Storage is bounded on
//! both axes (boxes per class and distinct classes), and a submission that
//! would exceed either bound fails without touching accepted state.

use crate::cluster::merge_overlapping;
use crate::geometry::BoundingBox;
use crate::sink::DetectionSink;
use crate::trace::{trace_event, trace_span};
use crate::util::{BoxMergeError, BoxMergeResult};

/// Capacity bounds for one suppression session.
#[derive(Clone, Copy, Debug)]
pub struct SuppressConfig {
    /// Raw candidates accepted per class before
    /// [`BoxMergeError::CapacityExceeded`].
    pub max_boxes_per_class: usize,
    /// Distinct class ids accepted before
    /// [`BoxMergeError::TooManyClasses`].
    pub max_classes: usize,
}

impl Default for SuppressConfig {
    fn default() -> Self {
        Self {
            max_boxes_per_class: 10,
            max_classes: 10,
        }
    }
}

/// Candidates submitted for one class id, plus the survivors once the
/// suppression pass has run.
#[derive(Debug)]
struct ClassBucket {
    class_id: i32,
    raw: Vec<BoundingBox>,
    picked: Vec<BoundingBox>,
}

impl ClassBucket {
    fn new(class_id: i32, capacity: usize) -> Self {
        Self {
            class_id,
            raw: Vec::with_capacity(capacity),
            picked: Vec::new(),
        }
    }
}

/// One frame's worth of detection filtering.
#[derive(Debug, Default)]
pub struct Suppressor {
    buckets: Vec<ClassBucket>,
    config: SuppressConfig,
}

impl Suppressor {
    /// Creates a session with the default bounds of [`SuppressConfig`].
    pub fn new() -> Self {
        Self::with_config(SuppressConfig::default())
    }

    /// Creates a session with explicit bounds.
    pub fn with_config(config: SuppressConfig) -> Self {
        Self {
            buckets: Vec::new(),
            config,
        }
    }

    /// Number of distinct classes seen so far.
    pub fn num_classes(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of accepted candidates across all classes.
    pub fn num_boxes(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.raw.len()).sum()
    }

    /// True when no candidate has been accepted yet.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Accepts one raw detection into the bucket matching its class id.
    ///
    /// Buckets are created lazily, in the order class ids are first seen;
    /// lookup is a linear scan over the (small, bounded) bucket list. A
    /// full bucket or an exhausted class bound rejects the detection and
    /// leaves everything accepted so far untouched.
    pub fn submit(&mut self, detection: BoundingBox) -> BoxMergeResult<()> {
        if let Some(bucket) = self
            .buckets
            .iter_mut()
            .find(|bucket| bucket.class_id == detection.class_id)
        {
            if bucket.raw.len() >= self.config.max_boxes_per_class {
                return Err(BoxMergeError::CapacityExceeded {
                    class_id: detection.class_id,
                    capacity: self.config.max_boxes_per_class,
                });
            }
            bucket.raw.push(detection);
            return Ok(());
        }

        if self.config.max_boxes_per_class == 0 {
            return Err(BoxMergeError::CapacityExceeded {
                class_id: detection.class_id,
                capacity: 0,
            });
        }
        if self.buckets.len() >= self.config.max_classes {
            return Err(BoxMergeError::TooManyClasses {
                class_id: detection.class_id,
                max_classes: self.config.max_classes,
            });
        }

        let mut bucket = ClassBucket::new(detection.class_id, self.config.max_boxes_per_class);
        bucket.raw.push(detection);
        self.buckets.push(bucket);
        Ok(())
    }

    /// Runs suppression once and streams survivors to `sink`.
    ///
    /// Buckets dispatch in first-seen-class order; within a bucket boxes
    /// arrive in cluster-formation order, highest remaining score first
    /// (see [`merge_overlapping`]). A sink that declines a box skips the
    /// rest of that bucket only. Returns the number of boxes the sink
    /// accepted.
    pub fn run<S>(mut self, iou_threshold: i32, sink: &mut S) -> usize
    where
        S: DetectionSink + ?Sized,
    {
        let _span = trace_span!("suppress", classes = self.buckets.len()).entered();

        let mut delivered = 0;
        for bucket in &mut self.buckets {
            bucket.picked = merge_overlapping(&mut bucket.raw, iou_threshold);
            trace_event!(
                "class_suppressed",
                class_id = bucket.class_id,
                raw = bucket.raw.len(),
                picked = bucket.picked.len(),
            );
            for survivor in &bucket.picked {
                if !sink.on_detection(survivor) {
                    break;
                }
                delivered += 1;
            }
        }
        delivered
    }
}
