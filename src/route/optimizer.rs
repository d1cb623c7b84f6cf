use crate::geometry::Point;

/// Shrink a waypoint sequence to a minimal subsequence whose consecutive
/// points remain mutually visible.
///
/// Two-pointer expanding window: fix `start`, walk `end` backward from the
/// far end of the list; when `start` and `end` see each other, everything
/// strictly between them is deleted and `end` snaps back to the new last
/// index. `start` advances once the window collapses. Not guaranteed
/// globally minimal, but deterministic and O(n^2) visibility checks worst
/// case.
pub fn optimize_route<F>(route: &mut Vec<Point>, mut points_are_visible: F)
where
    F: FnMut(Point, Point) -> bool,
{
    if route.len() < 3 {
        return;
    }
    let mut start = 0usize;
    let mut end = route.len() - 1;
    loop {
        if end - start <= 1 {
            start += 1;
            end = route.len() - 1;
            if start >= route.len() - 2 {
                break;
            }
        }
        if points_are_visible(route[start], route[end]) {
            route.drain(start + 1..end);
            end = route.len() - 1;
        } else {
            end -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn full_visibility_collapses_to_endpoints() {
        let mut route = points(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)]);
        optimize_route(&mut route, |_, _| true);
        assert_eq!(route, points(&[(0.0, 0.0), (30.0, 0.0)]));
    }

    #[test]
    fn no_visibility_keeps_every_waypoint() {
        let original = points(&[(0.0, 0.0), (10.0, 5.0), (20.0, 0.0), (30.0, 5.0)]);
        let mut route = original.clone();
        optimize_route(&mut route, |a, b| {
            // Only consecutive points see each other.
            a.distance_to(b) < 12.0
        });
        assert_eq!(route, original);
    }

    #[test]
    fn short_routes_are_untouched() {
        let mut route = points(&[(0.0, 0.0), (10.0, 10.0)]);
        optimize_route(&mut route, |_, _| true);
        assert_eq!(route.len(), 2);
    }

    #[test]
    fn partial_visibility_removes_only_redundant_interior() {
        // 0 sees 2 but not 3; 1 is redundant.
        let mut route = points(&[(0.0, 0.0), (5.0, 5.0), (10.0, 0.0), (20.0, 20.0)]);
        optimize_route(&mut route, |a, b| !(a == Point::new(0.0, 0.0) && b == Point::new(20.0, 20.0)));
        assert_eq!(route, points(&[(0.0, 0.0), (10.0, 0.0), (20.0, 20.0)]));
    }
}
