use geom_kernel::query::{point_circle, point_segment};
use geom_kernel::{Circle, Point3, Primitive, Segment, Vector3};

fn p(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, y, z)
}

/// One primitive of each kind, spread out so nothing is interior to the
/// sphere or capsule.
fn assorted_primitives() -> Vec<Primitive> {
    vec![
        Primitive::Point(p(0.5, -2.0, 3.0)),
        Primitive::Line(geom_kernel::Line::new(p(0.0, 0.0, 0.0), p(1.0, 0.5, 0.0))),
        Primitive::Ray(geom_kernel::Ray::new(p(4.0, 4.0, 4.0), Vector3::y())),
        Primitive::Segment(Segment::new(p(-3.0, 1.0, 0.0), p(-1.0, 2.0, 1.0))),
        Primitive::Plane(geom_kernel::Plane::new(Vector3::z(), -5.0)),
        Primitive::Circle(Circle::new(p(6.0, 0.0, 0.0), Vector3::z(), 1.5)),
        Primitive::Disk(geom_kernel::Disk::new(p(0.0, 6.0, 0.0), Vector3::x(), 2.0)),
        Primitive::Sphere(geom_kernel::Sphere::new(p(-6.0, -6.0, 0.0), 1.0)),
        Primitive::Capsule(geom_kernel::Capsule::new(
            p(8.0, 8.0, 0.0),
            p(8.0, 8.0, 4.0),
            0.5,
        )),
        Primitive::Triangle(geom_kernel::Triangle::new(
            p(0.0, 0.0, 7.0),
            p(2.0, 0.0, 7.0),
            p(0.0, 2.0, 7.0),
        )),
        Primitive::Rectangle(geom_kernel::Rectangle::new(
            p(-5.0, 5.0, 5.0),
            Vector3::x(),
            Vector3::y(),
            [1.0, 2.0],
        )),
    ]
}

#[test]
fn distance_is_symmetric_across_supported_pairs() {
    let primitives = assorted_primitives();
    let mut checked = 0;

    for a in &primitives {
        for b in &primitives {
            let (Some(forward), Some(reverse)) = (a.distance_to(b), b.distance_to(a)) else {
                continue;
            };
            checked += 1;

            assert!(
                (forward.distance - reverse.distance).abs() < 1e-9,
                "asymmetric distance for {:?} vs {:?}",
                a,
                b
            );
            assert!(
                (forward.squared_distance - forward.distance * forward.distance).abs() < 1e-9
            );
            if !forward.interior {
                assert!(forward.distance >= 0.0);
            }
        }
    }

    // Every point pairing plus the line/ray/segment/triangle families.
    assert!(checked > 30);
}

#[test]
fn point_on_segment_reconstructs_through_parameter() {
    let segment = Segment::new(p(1.0, 1.0, 1.0), p(5.0, 1.0, 1.0));
    let on = p(2.0, 1.0, 1.0);

    let result = point_segment(&on, &segment);
    assert!(result.distance < 1e-12);
    let rebuilt = segment.at(result.parameters[1]);
    assert!((rebuilt - on).norm() < 1e-12);
}

#[test]
fn parallel_segments_offset_by_one() {
    let a = Segment::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0));
    let b = Segment::new(p(0.0, 1.0, 0.0), p(1.0, 1.0, 0.0));

    let result = a.distance_to_segment(&b);
    assert!((result.distance - 1.0).abs() < 1e-12);

    // Closest points must be a corresponding pair straight across.
    let (c0, c1) = (result.closest_points[0], result.closest_points[1]);
    assert!((c0.x - c1.x).abs() < 1e-12);
    assert!((c1.y - c0.y - 1.0).abs() < 1e-12);
}

#[test]
fn on_axis_point_is_equidistant_from_circle() {
    let circle = Circle::new(p(0.0, 0.0, 0.0), Vector3::z(), 2.0);
    let apex = p(0.0, 0.0, 5.0);

    let result = point_circle(&apex, &circle);
    assert!(result.is_equidistant);
    assert!((result.distance - 29.0_f64.sqrt()).abs() < 1e-9);
    // The pick is arbitrary but must lie on the rim.
    assert!(((result.closest_points[1] - circle.center()).norm() - 2.0).abs() < 1e-9);
}

#[test]
fn query_results_survive_serialization() {
    let a = Primitive::Segment(Segment::new(p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0)));
    let b = Primitive::Point(p(1.0, 3.0, 0.0));

    let result = a.distance_to(&b).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let back: geom_kernel::QueryResult = serde_json::from_str(&json).unwrap();
    assert_eq!(result, back);

    let prim_json = serde_json::to_string(&a).unwrap();
    let prim_back: Primitive = serde_json::from_str(&prim_json).unwrap();
    assert_eq!(a, prim_back);
}
