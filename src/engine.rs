use std::time::Instant;

use crate::protocol::{RouteMetrics, RoutingReply, RoutingRequest};
use crate::route::{
    PointVisibilityMap, RouteError, compute_connector_path, find_accessible_routing_points,
};

/// An owned routing engine instance: the visibility map plus the
/// per-request processing pipeline. One engine serves one worker; tests
/// construct fresh instances freely.
#[derive(Debug, Default)]
pub struct RoutingEngine {
    visibility_map: PointVisibilityMap,
}

impl RoutingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a full canvas snapshot: refresh the visibility map from the
    /// entity descriptors, route every connector, and return the augmented
    /// descriptors plus phase timings.
    ///
    /// An unknown or unsupported routing algorithm fails the request; that
    /// is a caller configuration bug, not a routable state. Unroutable
    /// geometry never errors: affected connectors carry a straight
    /// centroid-to-centroid path instead.
    pub fn process_request(&mut self, request: RoutingRequest) -> Result<RoutingReply, RouteError> {
        let overall_started = Instant::now();
        let mut metrics = RouteMetrics::default();

        let decode_started = Instant::now();
        let accessible =
            find_accessible_routing_points(&request.entity_descriptors, &request.entity_descriptors);
        metrics.msg_decode_time_ms = elapsed_ms(decode_started);

        let update_started = Instant::now();
        self.visibility_map
            .update_from_entity_descriptors(&request.entity_descriptors, request.grid_size);
        metrics.map_update_time_ms = elapsed_ms(update_started);
        metrics.num_routing_points = self.visibility_map.routing_point_count();
        metrics.num_boundary_lines = self.visibility_map.boundary_line_count();

        let compute_started = Instant::now();
        let mut connectors = request.connector_descriptors;
        for connector in &mut connectors {
            let computed =
                compute_connector_path(connector, &accessible.points, &mut self.visibility_map)?;
            connector.svg_path = Some(computed.svg_path);
            connector.points_in_path = Some(
                computed
                    .points_in_path
                    .iter()
                    .flat_map(|point| [point.x, point.y])
                    .collect(),
            );
        }
        metrics.path_compute_time_ms = elapsed_ms(compute_started);
        metrics.overall_time_ms = elapsed_ms(overall_started);

        Ok(RoutingReply {
            connector_descriptors: connectors,
            metrics,
        })
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{
        ConnectorAnchorDescriptor, ConnectorDescriptor, EntityDescriptor, RoutingAlgorithm,
    };

    fn scene_request(algorithm: RoutingAlgorithm) -> RoutingRequest {
        let entity = |id: &str, x: f64, point: [f64; 2]| EntityDescriptor {
            id: id.to_string(),
            x,
            y: 40.0,
            width: 20.0,
            height: 20.0,
            connector_anchors: vec![ConnectorAnchorDescriptor {
                id: format!("{id}-a"),
                x: x + 9.0,
                y: 49.0,
                width: 2.0,
                height: 2.0,
                routing_points_float64_arr: point.to_vec(),
            }],
        };
        RoutingRequest {
            grid_size: 10.0,
            connector_descriptors: vec![ConnectorDescriptor {
                id: "c1".to_string(),
                anchor_start_centroid_arr: [10.0, 50.0],
                anchor_end_centroid_arr: [90.0, 50.0],
                marker_start_size: 0.0,
                marker_end_size: 0.0,
                curvature_px: 0.0,
                routing_algorithm: algorithm,
                svg_path: None,
                points_in_path: None,
            }],
            entity_descriptors: vec![
                entity("a", 0.0, [25.0, 50.0]),
                entity("b", 80.0, [75.0, 50.0]),
            ],
        }
    }

    #[test]
    fn reply_carries_paths_and_metrics() {
        let mut engine = RoutingEngine::new();
        let reply = engine
            .process_request(scene_request(RoutingAlgorithm::AStarWithRouteOptimization))
            .unwrap();
        let connector = &reply.connector_descriptors[0];
        let svg_path = connector.svg_path.as_deref().unwrap();
        assert!(svg_path.starts_with("M25 50"));
        let buffer = connector.points_in_path.as_ref().unwrap();
        assert_eq!(buffer.len() % 2, 0);
        assert!(buffer.len() >= 4);
        assert!(reply.metrics.num_routing_points > 0);
        assert!(reply.metrics.num_boundary_lines > 0);
    }

    #[test]
    fn straight_line_between_anchors_skips_the_search() {
        let mut engine = RoutingEngine::new();
        let reply = engine
            .process_request(scene_request(RoutingAlgorithm::StraightLineBetweenAnchors))
            .unwrap();
        let connector = &reply.connector_descriptors[0];
        assert_eq!(connector.svg_path.as_deref(), Some("M25 50L75 50"));
    }

    #[test]
    fn unsupported_algorithm_fails_the_request() {
        let mut engine = RoutingEngine::new();
        let err = engine
            .process_request(scene_request(RoutingAlgorithm::StraightLine))
            .unwrap_err();
        assert_eq!(err, RouteError::UnsupportedAlgorithm(0));
    }

    #[test]
    fn successive_requests_track_entity_motion() {
        let mut engine = RoutingEngine::new();
        let first = scene_request(RoutingAlgorithm::AStarWithRouteOptimization);
        engine.process_request(first.clone()).unwrap();

        let mut moved = first;
        moved.entity_descriptors[1].x = 120.0;
        moved.entity_descriptors[1].connector_anchors[0].x = 129.0;
        moved.entity_descriptors[1].connector_anchors[0].routing_points_float64_arr =
            vec![115.0, 50.0];
        moved.connector_descriptors[0].anchor_end_centroid_arr = [130.0, 50.0];
        let reply = engine.process_request(moved).unwrap();
        let svg_path = reply.connector_descriptors[0].svg_path.as_deref().unwrap();
        assert!(svg_path.ends_with("L115 50"));
    }
}
