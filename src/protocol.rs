use serde::{Deserialize, Serialize};

use crate::geometry::{Point, PointSet, Rectangle};
use crate::route::RouteError;

/// Path search strategy requested per connector. Wire values match the
/// canvas-side enum; values outside `0..=5` fail decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RoutingAlgorithm {
    StraightLine = 0,
    StraightLineBetweenAnchors = 1,
    StraightLineAvoidSelfIntersection = 2,
    AStar = 3,
    AStarWithRouteOptimization = 4,
    AStarThetaWithRouteOptimization = 5,
}

impl TryFrom<u8> for RoutingAlgorithm {
    type Error = RouteError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::StraightLine),
            1 => Ok(Self::StraightLineBetweenAnchors),
            2 => Ok(Self::StraightLineAvoidSelfIntersection),
            3 => Ok(Self::AStar),
            4 => Ok(Self::AStarWithRouteOptimization),
            5 => Ok(Self::AStarThetaWithRouteOptimization),
            other => Err(RouteError::UnknownAlgorithm(other)),
        }
    }
}

impl From<RoutingAlgorithm> for u8 {
    fn from(algorithm: RoutingAlgorithm) -> u8 {
        algorithm as u8
    }
}

/// A connector attachment box on an entity, carrying its candidate routing
/// points as a flat interleaved buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorAnchorDescriptor {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "routingPointsFloat64Arr", default)]
    pub routing_points_float64_arr: Vec<f64>,
}

impl ConnectorAnchorDescriptor {
    pub fn bounding_rect(&self) -> Rectangle {
        Rectangle::from_origin_and_size(self.x, self.y, self.width, self.height)
    }

    pub fn routing_points(&self) -> PointSet {
        PointSet::from_float64_slice(&self.routing_points_float64_arr)
    }
}

/// An obstacle box on the canvas, supplied fresh on every routing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "connectorAnchors", default)]
    pub connector_anchors: Vec<ConnectorAnchorDescriptor>,
}

impl EntityDescriptor {
    pub fn bounding_rect(&self) -> Rectangle {
        Rectangle::from_origin_and_size(self.x, self.y, self.width, self.height)
    }
}

/// One connector to route. The reply carries the same descriptor back with
/// `svgPath` and `pointsInPath` filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorDescriptor {
    pub id: String,
    pub anchor_start_centroid_arr: [f64; 2],
    pub anchor_end_centroid_arr: [f64; 2],
    #[serde(default)]
    pub marker_start_size: f64,
    #[serde(default)]
    pub marker_end_size: f64,
    #[serde(default)]
    pub curvature_px: f64,
    pub routing_algorithm: RoutingAlgorithm,
    #[serde(rename = "svgPath", default, skip_serializing_if = "Option::is_none")]
    pub svg_path: Option<String>,
    #[serde(
        rename = "pointsInPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub points_in_path: Option<Vec<f64>>,
}

impl ConnectorDescriptor {
    pub fn anchor_start_centroid(&self) -> Point {
        Point::new(self.anchor_start_centroid_arr[0], self.anchor_start_centroid_arr[1])
    }

    pub fn anchor_end_centroid(&self) -> Point {
        Point::new(self.anchor_end_centroid_arr[0], self.anchor_end_centroid_arr[1])
    }
}

/// Request message: the complete canvas state relevant to routing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingRequest {
    #[serde(rename = "gridSize")]
    pub grid_size: f64,
    #[serde(rename = "connectorDescriptors", default)]
    pub connector_descriptors: Vec<ConnectorDescriptor>,
    #[serde(rename = "entityDescriptors", default)]
    pub entity_descriptors: Vec<EntityDescriptor>,
}

/// Reply message: the request's connector descriptors augmented with the
/// computed paths, plus timing metrics for the processing phases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingReply {
    #[serde(rename = "connectorDescriptors")]
    pub connector_descriptors: Vec<ConnectorDescriptor>,
    pub metrics: RouteMetrics,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RouteMetrics {
    #[serde(rename = "msgDecodeTimeMs")]
    pub msg_decode_time_ms: f64,
    #[serde(rename = "mapUpdateTimeMs")]
    pub map_update_time_ms: f64,
    #[serde(rename = "pathComputeTimeMs")]
    pub path_compute_time_ms: f64,
    #[serde(rename = "overallTimeMs")]
    pub overall_time_ms: f64,
    #[serde(rename = "numRoutingPoints")]
    pub num_routing_points: usize,
    #[serde(rename = "numBoundaryLines")]
    pub num_boundary_lines: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_round_trips_through_wire_values() {
        for value in 0u8..=5 {
            let algorithm = RoutingAlgorithm::try_from(value).unwrap();
            assert_eq!(u8::from(algorithm), value);
        }
    }

    #[test]
    fn unknown_algorithm_value_is_rejected() {
        assert!(RoutingAlgorithm::try_from(7).is_err());
        let err = serde_json::from_str::<RoutingAlgorithm>("7").unwrap_err();
        assert!(err.to_string().contains("7"));
    }

    #[test]
    fn request_decodes_wire_field_names() {
        let raw = r#"{
            "gridSize": 12.0,
            "connectorDescriptors": [{
                "id": "c1",
                "anchor_start_centroid_arr": [10.0, 10.0],
                "anchor_end_centroid_arr": [90.0, 90.0],
                "marker_start_size": 0.0,
                "marker_end_size": 4.0,
                "curvature_px": 0.0,
                "routing_algorithm": 4
            }],
            "entityDescriptors": [{
                "id": "e1",
                "x": 0.0, "y": 0.0, "width": 20.0, "height": 20.0,
                "connectorAnchors": [{
                    "id": "a1",
                    "x": 8.0, "y": 8.0, "width": 4.0, "height": 4.0,
                    "routingPointsFloat64Arr": [10.0, -2.0, 22.0, 10.0]
                }]
            }]
        }"#;
        let request: RoutingRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.grid_size, 12.0);
        assert_eq!(
            request.connector_descriptors[0].routing_algorithm,
            RoutingAlgorithm::AStarWithRouteOptimization
        );
        let anchor = &request.entity_descriptors[0].connector_anchors[0];
        assert_eq!(anchor.routing_points().count(), 2);
    }

    #[test]
    fn reply_serializes_augmented_fields() {
        let connector = ConnectorDescriptor {
            id: "c1".to_string(),
            anchor_start_centroid_arr: [0.0, 0.0],
            anchor_end_centroid_arr: [10.0, 0.0],
            marker_start_size: 0.0,
            marker_end_size: 0.0,
            curvature_px: 0.0,
            routing_algorithm: RoutingAlgorithm::StraightLineBetweenAnchors,
            svg_path: Some("M0 0L10 0".to_string()),
            points_in_path: Some(vec![0.0, 0.0, 10.0, 0.0]),
        };
        let reply = RoutingReply {
            connector_descriptors: vec![connector],
            metrics: RouteMetrics::default(),
        };
        let json = serde_json::to_string(&reply).unwrap();
        assert!(json.contains("\"svgPath\""));
        assert!(json.contains("\"pointsInPath\""));
        assert!(json.contains("\"numRoutingPoints\""));
    }
}
