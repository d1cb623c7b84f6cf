use crate::geometry::{Line, Point, PointSet};
use crate::protocol::{ConnectorDescriptor, RoutingAlgorithm};

use super::{PointVisibilityMap, RouteError, points_to_path};

/// The routed result for one connector.
#[derive(Debug, Clone)]
pub struct ComputedConnectorPath {
    pub svg_path: String,
    pub points_in_path: Vec<Point>,
}

/// Route one connector against the current visibility map.
///
/// The requested centroids are first adjusted onto accessible routing
/// points: among the points tied for the shortest distance to the anchor's
/// centroid, the one closest to the opposite centroid wins, which shortens
/// the overall path when an anchor offers several equidistant candidates.
/// When no accessible point exists the raw centroids are used directly and
/// the connector degrades to a straight line; a path is always produced.
pub fn compute_connector_path(
    connector: &ConnectorDescriptor,
    accessible_points: &PointSet,
    visibility_map: &mut PointVisibilityMap,
) -> Result<ComputedConnectorPath, RouteError> {
    let start_centroid = connector.anchor_start_centroid();
    let end_centroid = connector.anchor_end_centroid();

    let adjusted_start = adjusted_anchor_point(accessible_points, start_centroid, end_centroid);
    let adjusted_end = adjusted_anchor_point(accessible_points, end_centroid, start_centroid);

    let waypoints = match connector.routing_algorithm {
        RoutingAlgorithm::StraightLineBetweenAnchors => PointSet::new(),
        RoutingAlgorithm::AStar => {
            route_between(visibility_map, adjusted_start, adjusted_end, false)
        }
        RoutingAlgorithm::AStarWithRouteOptimization
        | RoutingAlgorithm::AStarThetaWithRouteOptimization => {
            route_between(visibility_map, adjusted_start, adjusted_end, true)
        }
        unsupported => return Err(RouteError::UnsupportedAlgorithm(unsupported.into())),
    };
    let waypoints = waypoints.as_slice();

    let path_start = adjusted_start.unwrap_or(start_centroid);
    let path_end = adjusted_end.unwrap_or(end_centroid);

    // The search's first/last waypoint may coincide with the adjusted
    // endpoints (they are routing points themselves); adjacent duplicates
    // are collapsed so no leg ever has zero length.
    let mut points_in_path = Vec::with_capacity(waypoints.len() + 2);
    points_in_path.push(path_start);
    for waypoint in waypoints {
        if points_in_path.last() != Some(waypoint) {
            points_in_path.push(*waypoint);
        }
    }
    if points_in_path.last() == Some(&path_end) && points_in_path.len() > 1 {
        points_in_path.pop();
    }
    points_in_path.push(path_end);

    // Marker clearance pulls the path off the anchor so the line stops
    // short of the arrowhead. Only meaningful when a route was searched;
    // bare anchor-to-anchor lines keep their full length.
    if !waypoints.is_empty() && points_in_path.len() >= 2 {
        if connector.marker_start_size > 0.0 {
            let first_leg = Line::new(points_in_path[0], points_in_path[1]);
            points_in_path[0] = first_leg.shortened(connector.marker_start_size, 0.0).start;
        }
        if connector.marker_end_size > 0.0 {
            let last = points_in_path.len() - 1;
            let last_leg = Line::new(points_in_path[last - 1], points_in_path[last]);
            points_in_path[last] = last_leg.shortened(0.0, connector.marker_end_size).end;
        }
    }

    Ok(ComputedConnectorPath {
        svg_path: points_to_path(&points_in_path, connector.curvature_px),
        points_in_path,
    })
}

fn route_between(
    visibility_map: &mut PointVisibilityMap,
    start: Option<Point>,
    end: Option<Point>,
    optimize: bool,
) -> PointSet {
    match (start, end) {
        (Some(start), Some(end)) => visibility_map.compute_route(start, end, optimize),
        _ => PointSet::new(),
    }
}

fn adjusted_anchor_point(
    accessible_points: &PointSet,
    own_centroid: Point,
    opposite_centroid: Point,
) -> Option<Point> {
    let radius = accessible_points.find_distance_to_point_closest_to(own_centroid)?;
    accessible_points
        .find_points_close_to(own_centroid, radius)
        .find_point_closest_to(opposite_centroid)
}
