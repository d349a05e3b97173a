use crate::geometry::Point2;
use crate::sketch::constraint::SketchConstraint;
use crate::sketch::types::Sketch;
use crate::sketch::{EntityId, EntityKind, SketchError};

#[test]
fn test_ids_share_one_namespace() {
    let mut sketch = Sketch::new();
    let p0 = sketch.add_point(Point2::new(0.0, 0.0));
    let p1 = sketch.add_point(Point2::new(5.0, 0.0));
    let l0 = sketch.add_line(p0, p1);
    let c0 = sketch.add_distance_constraint(l0, 5.0);

    // Sequential ids across all kinds.
    assert_eq!([p0, p1, l0, c0], [EntityId(0), EntityId(1), EntityId(2), EntityId(3)]);
    assert_eq!(sketch.entities().len(), 4);

    assert_eq!(sketch.entity(l0).unwrap().kind(), EntityKind::Line);
    assert_eq!(sketch.entity(c0).unwrap().kind(), EntityKind::DistanceConstraint);
}

#[test]
fn test_typed_lookup_errors() {
    let mut sketch = Sketch::new();
    let p0 = sketch.add_point(Point2::new(0.0, 0.0));
    let p1 = sketch.add_point(Point2::new(5.0, 0.0));
    let l0 = sketch.add_line(p0, p1);

    assert_eq!(sketch.point(p0).unwrap().position, Point2::new(0.0, 0.0));
    assert_eq!(sketch.line(l0).unwrap().start, p0);

    // A line id looked up as a point is a mismatch, not a miss.
    assert_eq!(
        sketch.point(l0).unwrap_err(),
        SketchError::KindMismatch {
            id: l0,
            expected: EntityKind::Point,
            found: EntityKind::Line,
        }
    );
    assert_eq!(
        sketch.line(p0).unwrap_err(),
        SketchError::KindMismatch {
            id: p0,
            expected: EntityKind::Line,
            found: EntityKind::Point,
        }
    );
    assert_eq!(
        sketch.point(EntityId(99)).unwrap_err(),
        SketchError::NotFound(EntityId(99))
    );
}

#[test]
fn test_filtered_views_preserve_insertion_order() {
    let mut sketch = Sketch::new();
    let p0 = sketch.add_point(Point2::new(0.0, 0.0));
    let p1 = sketch.add_point(Point2::new(5.0, 0.0));
    let p2 = sketch.add_point(Point2::new(5.0, 5.0));
    let l0 = sketch.add_line(p0, p1);
    let c0 = sketch.add_angle_constraint(p1, p0, p2, 90.0);
    let l1 = sketch.add_line(p1, p2);
    let c1 = sketch.add_distance_constraint(l0, 5.0);

    let point_ids: Vec<_> = sketch.points().map(|p| p.id).collect();
    assert_eq!(point_ids, vec![p0, p1, p2]);

    let line_ids: Vec<_> = sketch.lines().map(|l| l.id).collect();
    assert_eq!(line_ids, vec![l0, l1]);

    // The constraint view is the solver's application order.
    let constraint_ids: Vec<_> = sketch.constraints().map(|c| c.id()).collect();
    assert_eq!(constraint_ids, vec![c0, c1]);
    assert!(matches!(
        sketch.constraints().next(),
        Some(SketchConstraint::Angle(_))
    ));
}

#[test]
fn test_snapshot_restore_value_semantics() {
    let mut sketch = Sketch::new();
    let p0 = sketch.add_point(Point2::new(1.0, 2.0));
    let p1 = sketch.add_point(Point2::new(3.0, 4.0));
    sketch.add_line(p0, p1);

    let snapshot = sketch.snapshot();

    // Mutations after the snapshot must not leak into it.
    sketch.point_mut(p0).unwrap().position = Point2::new(100.0, 100.0);
    sketch.point_mut(p1).unwrap().position = Point2::new(-7.0, 0.5);
    assert_eq!(sketch.point(p0).unwrap().position, Point2::new(100.0, 100.0));

    sketch.restore(snapshot);
    assert_eq!(sketch.point(p0).unwrap().position, Point2::new(1.0, 2.0));
    assert_eq!(sketch.point(p1).unwrap().position, Point2::new(3.0, 4.0));
}

#[test]
fn test_ids_survive_serde_round_trip() {
    let mut sketch = Sketch::new();
    let p0 = sketch.add_point(Point2::new(1.0, 1.0));
    let p1 = sketch.add_point(Point2::new(1.0, 10.0));
    let l0 = sketch.add_line(p0, p1);
    sketch.add_distance_constraint(l0, 6.0);

    let json = serde_json::to_string(&sketch).expect("failed to serialize sketch");
    let restored: Sketch = serde_json::from_str(&json).expect("failed to deserialize sketch");

    assert_eq!(restored, sketch);
    // The id counter must survive too, so authoring can continue.
    let mut restored = restored;
    let p2 = restored.add_point(Point2::new(0.0, 0.0));
    assert_eq!(p2, EntityId(4));
}
