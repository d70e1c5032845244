use boxmerge::{BoundingBox, BoxMergeError, SuppressConfig, Suppressor};

#[test]
fn different_classes_never_merge() {
    let mut session = Suppressor::new();
    session.submit(BoundingBox::new(0, 0, 5, 5, 70, 1)).unwrap();
    session.submit(BoundingBox::new(0, 0, 5, 5, 70, 2)).unwrap();

    let mut survivors = Vec::new();
    session.run(0, &mut survivors);

    assert_eq!(
        survivors,
        [
            BoundingBox::new(0, 0, 5, 5, 70, 1),
            BoundingBox::new(0, 0, 5, 5, 70, 2),
        ]
    );
}

#[test]
fn capacity_error_leaves_bucket_intact() {
    let mut session = Suppressor::new();
    for i in 0..10 {
        session
            .submit(BoundingBox::new(20 * i, 0, 20 * i + 10, 10, 90 - i, 7))
            .unwrap();
    }

    let err = session
        .submit(BoundingBox::new(300, 0, 310, 10, 50, 7))
        .unwrap_err();
    assert_eq!(
        err,
        BoxMergeError::CapacityExceeded {
            class_id: 7,
            capacity: 10,
        }
    );
    assert_eq!(session.num_boxes(), 10);

    let mut survivors = Vec::new();
    session.run(50, &mut survivors);
    assert_eq!(survivors.len(), 10);
}

#[test]
fn class_bound_rejects_new_classes_only() {
    let mut session = Suppressor::with_config(SuppressConfig {
        max_boxes_per_class: 4,
        max_classes: 2,
    });
    session.submit(BoundingBox::new(0, 0, 10, 10, 90, 1)).unwrap();
    session.submit(BoundingBox::new(0, 0, 10, 10, 80, 2)).unwrap();

    let err = session
        .submit(BoundingBox::new(0, 0, 10, 10, 70, 3))
        .unwrap_err();
    assert_eq!(
        err,
        BoxMergeError::TooManyClasses {
            class_id: 3,
            max_classes: 2,
        }
    );

    // Known classes still accept.
    session.submit(BoundingBox::new(50, 0, 60, 10, 60, 1)).unwrap();
    assert_eq!(session.num_classes(), 2);
    assert_eq!(session.num_boxes(), 3);
}

#[test]
fn zero_box_capacity_rejects_first_submission() {
    let mut session = Suppressor::with_config(SuppressConfig {
        max_boxes_per_class: 0,
        max_classes: 10,
    });

    let err = session
        .submit(BoundingBox::new(0, 0, 10, 10, 90, 1))
        .unwrap_err();
    assert_eq!(
        err,
        BoxMergeError::CapacityExceeded {
            class_id: 1,
            capacity: 0,
        }
    );
    assert!(session.is_empty());
}

#[test]
fn buckets_dispatch_in_first_seen_class_order() {
    let mut session = Suppressor::new();
    session.submit(BoundingBox::new(0, 0, 10, 10, 60, 5)).unwrap();
    session.submit(BoundingBox::new(0, 0, 10, 10, 90, 2)).unwrap();
    session.submit(BoundingBox::new(100, 0, 110, 10, 50, 5)).unwrap();

    let mut survivors = Vec::new();
    session.run(50, &mut survivors);

    let classes: Vec<i32> = survivors.iter().map(|b| b.class_id).collect();
    assert_eq!(classes, [5, 5, 2]);
}

#[test]
fn sink_refusal_skips_rest_of_bucket_only() {
    let mut session = Suppressor::new();
    session.submit(BoundingBox::new(0, 0, 10, 10, 90, 1)).unwrap();
    session.submit(BoundingBox::new(100, 0, 110, 10, 80, 1)).unwrap();
    session.submit(BoundingBox::new(0, 0, 10, 10, 70, 2)).unwrap();

    let mut seen = Vec::new();
    let mut calls = 0;
    let delivered = session.run(50, &mut |detection: &BoundingBox| {
        calls += 1;
        if calls == 2 {
            return false;
        }
        seen.push(*detection);
        true
    });

    assert_eq!(delivered, 2);
    assert_eq!(
        seen,
        [
            BoundingBox::new(0, 0, 10, 10, 90, 1),
            BoundingBox::new(0, 0, 10, 10, 70, 2),
        ]
    );
}

#[test]
fn empty_session_delivers_nothing() {
    let session = Suppressor::new();
    let mut survivors = Vec::new();
    assert_eq!(session.run(50, &mut survivors), 0);
    assert!(survivors.is_empty());
}

#[derive(serde::Deserialize)]
struct DetectionRecord {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    score: i32,
    class_id: i32,
}

impl From<DetectionRecord> for BoundingBox {
    fn from(record: DetectionRecord) -> Self {
        BoundingBox::new(
            record.min_x,
            record.min_y,
            record.max_x,
            record.max_y,
            record.score,
            record.class_id,
        )
    }
}

#[test]
fn decoded_detection_records_drive_a_full_pass() {
    let records: Vec<DetectionRecord> = serde_json::from_str(
        r#"[
            {"min_x": 0, "min_y": 0, "max_x": 10, "max_y": 10, "score": 90, "class_id": 0},
            {"min_x": 1, "min_y": 1, "max_x": 11, "max_y": 11, "score": 80, "class_id": 0},
            {"min_x": 40, "min_y": 40, "max_x": 60, "max_y": 60, "score": 75, "class_id": 6}
        ]"#,
    )
    .unwrap();

    let mut session = Suppressor::new();
    for record in records {
        session.submit(record.into()).unwrap();
    }
    assert_eq!(session.num_classes(), 2);
    assert_eq!(session.num_boxes(), 3);

    let mut survivors = Vec::new();
    session.run(50, &mut survivors);
    assert_eq!(
        survivors,
        [
            BoundingBox::new(0, 0, 11, 11, 90, 0),
            BoundingBox::new(40, 40, 60, 60, 75, 6),
        ]
    );
}
