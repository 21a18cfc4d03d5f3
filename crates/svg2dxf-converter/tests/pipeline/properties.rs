use proptest::prelude::*;
use svg2dxf_converter::{dedup_points, sample_count, Discretizer, PathCurve, Segment};
use svg2dxf_core::Point2;

fn point_strategy() -> impl Strategy<Value = Point2> {
    (-100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y)| Point2::new(x, y))
}

fn jittered_chain() -> impl Strategy<Value = Vec<Point2>> {
    (point_strategy(), prop::collection::vec((-0.03f64..0.03, -0.03f64..0.03), 0..64)).prop_map(
        |(start, steps)| {
            let mut current = start;
            let mut points = vec![current];
            for (dx, dy) in steps {
                current = Point2::new(current.x + dx, current.y + dy);
                points.push(current);
            }
            points
        },
    )
}

proptest! {
    #[test]
    fn dedup_is_idempotent(points in jittered_chain(), tol in 0.0f64..0.05) {
        let once = dedup_points(&points, tol);
        let twice = dedup_points(&once, tol);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn dedup_keeps_first_point_and_spacing(points in jittered_chain(), tol in 0.0f64..0.05) {
        let chain = dedup_points(&points, tol);
        prop_assert_eq!(chain.first(), points.first());
        for pair in chain.windows(2) {
            let dx = (pair[1].x - pair[0].x).abs();
            let dy = (pair[1].y - pair[0].y).abs();
            prop_assert!(dx > tol || dy > tol);
        }
    }

    #[test]
    fn sample_count_is_monotonic(a in 0.0f64..1000.0, b in 0.0f64..1000.0, density in 0.1f64..50.0) {
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(sample_count(short, density) <= sample_count(long, density));
        prop_assert!(sample_count(short, density) >= 2);
    }

    #[test]
    fn discretized_line_has_n_plus_one_points(from in point_strategy(), to in point_strategy(), scale in 0.1f64..5.0) {
        let curve = PathCurve::new(vec![Segment::line(from, to)], false);
        let sampled = Discretizer::default().discretize(&curve, scale).unwrap();
        prop_assert_eq!(sampled.points.len(), sampled.sample_count + 1);
        prop_assert!(sampled.sample_count >= 2);

        let first = sampled.points[0];
        prop_assert!((first.x - from.x * scale).abs() < 1e-9);
        prop_assert!((first.y - from.y * scale).abs() < 1e-9);
    }
}
