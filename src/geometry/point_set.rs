use super::Point;

/// An insertion-ordered collection of points, deduplicated by exact
/// equality. Insertion is an O(n) scan; per-frame point counts are small
/// enough that a hash structure would buy nothing over locality.
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode from a flat interleaved buffer `[x0, y0, x1, y1, ...]`.
    /// A trailing odd value is ignored.
    pub fn from_float64_slice(buffer: &[f64]) -> Self {
        let mut set = Self::new();
        for pair in buffer.chunks_exact(2) {
            set.push(Point::new(pair[0], pair[1]));
        }
        set
    }

    /// Encode to a flat interleaved buffer, preserving insertion order.
    pub fn to_float64_vec(&self) -> Vec<f64> {
        let mut buffer = Vec::with_capacity(self.points.len() * 2);
        for point in &self.points {
            buffer.push(point.x);
            buffer.push(point.y);
        }
        buffer
    }

    /// Append a point unless an equal one is already present. Returns
    /// whether the set changed.
    pub fn push(&mut self, point: Point) -> bool {
        if self.points.contains(&point) {
            return false;
        }
        self.points.push(point);
        true
    }

    pub fn push_all(&mut self, other: &PointSet) {
        for point in &other.points {
            self.push(*point);
        }
    }

    pub fn count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.points.contains(&point)
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn find_point_closest_to(&self, origin: Point) -> Option<Point> {
        let mut best: Option<(f64, Point)> = None;
        for point in &self.points {
            let distance = origin.distance_to(*point);
            match best {
                Some((best_distance, _)) if distance >= best_distance => {}
                _ => best = Some((distance, *point)),
            }
        }
        best.map(|(_, point)| point)
    }

    pub fn find_distance_to_point_closest_to(&self, origin: Point) -> Option<f64> {
        self.find_point_closest_to(origin)
            .map(|point| origin.distance_to(point))
    }

    /// Points within `radius` of `origin`, inclusive, in insertion order.
    pub fn find_points_close_to(&self, origin: Point, radius: f64) -> PointSet {
        let mut close = PointSet::new();
        for point in &self.points {
            if origin.distance_to(*point) <= radius {
                close.push(*point);
            }
        }
        close
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut set = PointSet::new();
        for point in iter {
            set.push(point);
        }
        set
    }
}
