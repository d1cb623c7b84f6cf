use std::collections::VecDeque;
use std::fmt::Write;

use crate::geometry::{Line, Point};

/// Convert an ordered point sequence into an SVG path descriptor.
///
/// With `curvature_px == 0` the output is a bare polyline. A positive
/// curvature rounds each interior corner by cutting it with a chamfer of
/// roughly `curvature_px` length; this is a tessellation, not a Bezier
/// curve, so downstream consumers still see only M/L commands.
pub fn points_to_path(points: &[Point], curvature_px: f64) -> String {
    let tessellated;
    let points = if curvature_px > 0.0 && points.len() >= 3 {
        tessellated = tessellate_corners(points, curvature_px);
        tessellated.as_slice()
    } else {
        points
    };

    let mut path = String::new();
    for (index, point) in points.iter().enumerate() {
        match index {
            0 => {
                let _ = write!(path, "M{} {}", point.x, point.y);
            }
            1 => {
                let _ = write!(path, "L{} {}", point.x, point.y);
            }
            _ => {
                let _ = write!(path, " L{} {}", point.x, point.y);
            }
        }
    }
    path
}

/// Consume the point list three at a time. For each triplet (a, b, c) the
/// leg a-b is shortened at its end and the leg b-c at its start, each by
/// half the curvature; the corner at b becomes two points. The tail of the
/// replacement is pushed back so the next triplet continues from it.
fn tessellate_corners(points: &[Point], curvature_px: f64) -> Vec<Point> {
    let mut remaining: VecDeque<Point> = points.iter().copied().collect();
    let mut out: Vec<Point> = Vec::with_capacity(points.len() * 2);

    while remaining.len() >= 3 {
        let (Some(a), Some(b), Some(c)) = (
            remaining.pop_front(),
            remaining.pop_front(),
            remaining.pop_front(),
        ) else {
            break;
        };
        let lead = Line::new(a, b).shortened(0.0, curvature_px / 2.0);
        let trail = Line::new(b, c).shortened(curvature_px / 2.0, 0.0);
        out.push(lead.start);
        out.push(lead.end);
        remaining.push_front(c);
        remaining.push_front(trail.start);
    }

    out.extend(remaining);
    out
}
