use std::collections::HashMap;

use crate::geometry::PointSet;
use crate::protocol::EntityDescriptor;

/// Outcome of filtering anchor candidate points against occluder boxes.
#[derive(Debug, Clone, Default)]
pub struct AccessibleRoutingPoints {
    /// Remaining valid-point count per connector anchor id. A count of zero
    /// (or below, when several occluders cover the same point) tells the
    /// caller no connector endpoint should be placed at that anchor.
    pub valid_count_per_anchor: HashMap<String, i32>,
    /// Points contained by no occluder, deduplicated, insertion-ordered.
    pub points: PointSet,
}

/// Collect every anchor's candidate routing points from `subjects` and drop
/// the ones that fall inside any occluder's bounding rectangle. O(points x
/// occluders); both factors stay small for a single diagram view.
pub fn find_accessible_routing_points(
    subjects: &[EntityDescriptor],
    occluders: &[EntityDescriptor],
) -> AccessibleRoutingPoints {
    let mut result = AccessibleRoutingPoints::default();

    let mut candidates = Vec::new();
    for entity in subjects {
        for anchor in &entity.connector_anchors {
            let points = anchor.routing_points();
            let count = result
                .valid_count_per_anchor
                .entry(anchor.id.clone())
                .or_insert(0);
            *count += points.count() as i32;
            for point in points.iter() {
                candidates.push((*point, anchor.id.clone()));
            }
        }
    }

    for (point, anchor_id) in candidates {
        let mut occluded = false;
        for occluder in occluders {
            if occluder.bounding_rect().contains_point(point) {
                occluded = true;
                if let Some(count) = result.valid_count_per_anchor.get_mut(&anchor_id) {
                    *count -= 1;
                }
            }
        }
        if !occluded {
            result.points.push(point);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::protocol::ConnectorAnchorDescriptor;

    fn entity(id: &str, x: f64, y: f64, size: f64, anchors: Vec<ConnectorAnchorDescriptor>) -> EntityDescriptor {
        EntityDescriptor {
            id: id.to_string(),
            x,
            y,
            width: size,
            height: size,
            connector_anchors: anchors,
        }
    }

    fn anchor(id: &str, routing_points: &[f64]) -> ConnectorAnchorDescriptor {
        ConnectorAnchorDescriptor {
            id: id.to_string(),
            x: 0.0,
            y: 0.0,
            width: 4.0,
            height: 4.0,
            routing_points_float64_arr: routing_points.to_vec(),
        }
    }

    #[test]
    fn occluded_points_are_dropped_and_counted() {
        // Anchor a1 offers two candidates; the occluder swallows one.
        let subject = entity(
            "e1",
            0.0,
            0.0,
            10.0,
            vec![anchor("a1", &[50.0, 50.0, -20.0, -20.0])],
        );
        let occluder = entity("e2", 40.0, 40.0, 20.0, vec![]);
        let found =
            find_accessible_routing_points(std::slice::from_ref(&subject), &[subject.clone(), occluder]);
        assert_eq!(found.valid_count_per_anchor["a1"], 1);
        assert_eq!(found.points.as_slice(), &[Point::new(-20.0, -20.0)]);
    }

    #[test]
    fn unoccluded_anchor_keeps_full_count() {
        let subject = entity("e1", 0.0, 0.0, 10.0, vec![anchor("a1", &[50.0, 50.0, 60.0, 60.0])]);
        let found = find_accessible_routing_points(std::slice::from_ref(&subject), &[subject.clone()]);
        assert_eq!(found.valid_count_per_anchor["a1"], 2);
        assert_eq!(found.points.count(), 2);
    }

    #[test]
    fn containment_by_several_occluders_decrements_each_time() {
        let subject = entity("e1", 0.0, 0.0, 4.0, vec![anchor("a1", &[50.0, 50.0])]);
        let occluder_a = entity("e2", 40.0, 40.0, 20.0, vec![]);
        let occluder_b = entity("e3", 45.0, 45.0, 20.0, vec![]);
        let found = find_accessible_routing_points(
            std::slice::from_ref(&subject),
            &[occluder_a, occluder_b],
        );
        assert_eq!(found.valid_count_per_anchor["a1"], -1);
        assert!(found.points.is_empty());
    }
}
