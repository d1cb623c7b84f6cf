use super::Point;

/// Classification of two directed segments against each other.
///
/// The parametric intersection system is solved with exact floating-point
/// comparisons against zero and the `[0, 1]` parameter range. Routing
/// coordinates are grid-derived, so the comparisons are reliable; callers
/// must not expect tolerance behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineIntersection {
    /// Direction vectors are proportional; the lines never meet.
    Parallel,
    /// Both segments lie on the same line.
    Coincident,
    /// The infinite lines cross, but outside at least one segment's bounds.
    Line(Point),
    /// The crossing point lies within both segments (inclusive bounds).
    LineSeg(Point),
}

/// A directed segment from `start` to `end`.
///
/// Zero-length lines are constructible but have an undefined direction;
/// `shortened` must not be called on them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    pub fn min_x(&self) -> f64 {
        self.start.x.min(self.end.x)
    }

    pub fn max_x(&self) -> f64 {
        self.start.x.max(self.end.x)
    }

    pub fn min_y(&self) -> f64 {
        self.start.y.min(self.end.y)
    }

    pub fn max_y(&self) -> f64 {
        self.start.y.max(self.end.y)
    }

    /// Unit direction vector. `(NaN, NaN)` for a zero-length line.
    pub fn direction_unit(&self) -> (f64, f64) {
        let len = self.length();
        ((self.end.x - self.start.x) / len, (self.end.y - self.start.y) / len)
    }

    /// A copy with the start advanced by `start_reduce_px` and the end
    /// retracted by `end_reduce_px`, both along the unit direction. Used for
    /// marker clearance and corner tessellation.
    pub fn shortened(&self, start_reduce_px: f64, end_reduce_px: f64) -> Line {
        let (dx, dy) = self.direction_unit();
        Line::new(
            Point::new(
                self.start.x + dx * start_reduce_px,
                self.start.y + dy * start_reduce_px,
            ),
            Point::new(
                self.end.x - dx * end_reduce_px,
                self.end.y - dy * end_reduce_px,
            ),
        )
    }

    /// Solve the 2D parametric intersection system via Cramer's rule on the
    /// two direction vectors.
    pub fn intersection(&self, other: &Line) -> LineIntersection {
        let denom = (other.end.y - other.start.y) * (self.end.x - self.start.x)
            - (other.end.x - other.start.x) * (self.end.y - self.start.y);
        let num_self = (other.end.x - other.start.x) * (self.start.y - other.start.y)
            - (other.end.y - other.start.y) * (self.start.x - other.start.x);
        let num_other = (self.end.x - self.start.x) * (self.start.y - other.start.y)
            - (self.end.y - self.start.y) * (self.start.x - other.start.x);

        if denom == 0.0 {
            if num_self == 0.0 && num_other == 0.0 {
                return LineIntersection::Coincident;
            }
            return LineIntersection::Parallel;
        }

        let u_self = num_self / denom;
        let u_other = num_other / denom;
        let crossing = Point::new(
            self.start.x + u_self * (self.end.x - self.start.x),
            self.start.y + u_self * (self.end.y - self.start.y),
        );

        if (0.0..=1.0).contains(&u_self) && (0.0..=1.0).contains(&u_other) {
            LineIntersection::LineSeg(crossing)
        } else {
            LineIntersection::Line(crossing)
        }
    }

    /// True when the crossing point lies within both segments.
    pub fn intersects_segment(&self, other: &Line) -> bool {
        matches!(self.intersection(other), LineIntersection::LineSeg(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
        Line::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn vertical_length() {
        assert_eq!(line(0.0, 0.0, 0.0, 100.0).length(), 100.0);
    }

    #[test]
    fn length_is_symmetric() {
        let a = Point::new(3.0, -7.0);
        let b = Point::new(-12.0, 41.0);
        assert_eq!(Line::new(a, b).length(), Line::new(b, a).length());
    }

    #[test]
    fn crossing_diagonals_intersect_within_segments() {
        let a = line(0.0, 0.0, 100.0, 100.0);
        let b = line(0.0, 100.0, 100.0, 0.0);
        assert_eq!(
            a.intersection(&b),
            LineIntersection::LineSeg(Point::new(50.0, 50.0))
        );
        assert_eq!(
            b.intersection(&a),
            LineIntersection::LineSeg(Point::new(50.0, 50.0))
        );
    }

    #[test]
    fn crossing_outside_segment_bounds_is_line_only() {
        let a = line(0.0, 0.0, 100.0, 100.0);
        let b = line(-500.0, -500.0, -500.0, 100.0);
        assert!(matches!(a.intersection(&b), LineIntersection::Line(_)));
        assert!(matches!(b.intersection(&a), LineIntersection::Line(_)));
    }

    #[test]
    fn parallel_segments_never_cross() {
        let a = line(0.0, 0.0, 100.0, 0.0);
        let b = line(0.0, 10.0, 100.0, 10.0);
        assert_eq!(a.intersection(&b), LineIntersection::Parallel);
    }

    #[test]
    fn coincident_segments_share_a_line() {
        let a = line(0.0, 0.0, 100.0, 0.0);
        let b = line(25.0, 0.0, 75.0, 0.0);
        assert_eq!(a.intersection(&b), LineIntersection::Coincident);
    }

    #[test]
    fn touching_endpoints_count_as_segment_intersection() {
        let a = line(0.0, 0.0, 10.0, 0.0);
        let b = line(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersects_segment(&b));
    }

    #[test]
    fn shortened_moves_both_endpoints_along_direction() {
        let shortened = line(0.0, 0.0, 10.0, 0.0).shortened(2.0, 3.0);
        assert_eq!(shortened.start, Point::new(2.0, 0.0));
        assert_eq!(shortened.end, Point::new(7.0, 0.0));
    }
}
