use super::{Line, Point};

/// An axis-aligned box. Callers guarantee `left <= right` and
/// `top <= bottom`; no normalization happens here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rectangle {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin_and_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn centroid(&self) -> Point {
        Point::new(
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    /// Corner points in top-left, top-right, bottom-right, bottom-left order.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }

    /// Boundary edges in top, right, bottom, left rotational order.
    pub fn edges(&self) -> [Line; 4] {
        let [tl, tr, br, bl] = self.corners();
        [
            Line::new(tl, tr),
            Line::new(tr, br),
            Line::new(br, bl),
            Line::new(bl, tl),
        ]
    }

    /// Inclusive containment on all four bounds.
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.left <= other.right
            && self.right >= other.left
            && self.top <= other.bottom
            && self.bottom >= other.top
    }

    /// True when `other` lies entirely within this rectangle.
    pub fn contains_rect(&self, other: &Rectangle) -> bool {
        other.left >= self.left
            && other.right <= self.right
            && other.top >= self.top
            && other.bottom <= self.bottom
    }

    pub fn inflated_by(&self, px: f64) -> Rectangle {
        Rectangle::new(self.left - px, self.top - px, self.right + px, self.bottom + px)
    }

    /// Corner points pushed outward from the centroid so the half-extent
    /// grows by exactly `grid_size` along each axis. Generates routing
    /// points guaranteed to sit outside the rectangle's own footprint.
    pub fn points_scaled_to_grid(&self, grid_size: f64) -> [Point; 4] {
        let centroid = self.centroid();
        let scale_x = ((self.right - centroid.x) + grid_size) / (self.right - centroid.x);
        let scale_y = ((self.bottom - centroid.y) + grid_size) / (self.bottom - centroid.y);
        self.corners().map(|corner| {
            Point::new(
                (corner.x - centroid.x) * scale_x + centroid.x,
                (corner.y - centroid.y) * scale_y + centroid.y,
            )
        })
    }
}
