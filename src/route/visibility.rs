use std::collections::BTreeMap;

use crate::geometry::{Line, LineSet, Point, PointSet, Rectangle};
use crate::protocol::EntityDescriptor;

use super::{find_accessible_routing_points, optimize_route};

/// Distance at which the route search treats the endpoint as reached.
/// Flagged for review: arguably this should scale with the grid size, but
/// changing it alters route termination on coarse grids.
const ROUTE_ARRIVAL_THRESHOLD_PX: f64 = 1.0;

/// A routing point together with its lazily computed set of mutually
/// visible points. `visible` is meaningful only while `valid` holds.
#[derive(Debug, Clone)]
struct RoutingPointNode {
    point: Point,
    visible: Vec<Point>,
    valid: bool,
}

impl RoutingPointNode {
    fn new(point: Point) -> Self {
        Self {
            point,
            visible: Vec::new(),
            valid: false,
        }
    }
}

/// Per-entity obstacle state: a geometry snapshot for mutation diffing, the
/// boundary segments routes must not cross, an aggregate box for broad-phase
/// rejection, and the entity's routing points.
#[derive(Debug, Clone)]
struct EntityOutline {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    boundary_lines: LineSet,
    extent: Rectangle,
    nodes: Vec<RoutingPointNode>,
}

/// Tracks which routing points can see each other across the current
/// obstacle set.
///
/// Entities are keyed in a `BTreeMap` so every scan over the map is
/// deterministic regardless of descriptor arrival order. Any entity
/// mutation invalidates every visibility cache map-wide; visibility is
/// recomputed lazily per point on the next query.
#[derive(Debug, Clone, Default)]
pub struct PointVisibilityMap {
    entities: BTreeMap<String, EntityOutline>,
}

impl PointVisibilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from bare free points and boundary segments, without any
    /// entity bookkeeping. Useful for direct geometric queries and tests.
    pub fn from_free_points_and_boundary_lines(points: &PointSet, boundary_lines: &LineSet) -> Self {
        let mut map = Self::new();
        let extent = extent_of(boundary_lines)
            .unwrap_or_else(|| Rectangle::new(f64::MAX, f64::MAX, f64::MIN, f64::MIN));
        map.entities.insert(
            String::new(),
            EntityOutline {
                x: extent.left,
                y: extent.top,
                width: extent.width(),
                height: extent.height(),
                boundary_lines: boundary_lines.clone(),
                extent,
                nodes: points.iter().map(|p| RoutingPointNode::new(*p)).collect(),
            },
        );
        map
    }

    /// Refresh the map from a full set of entity descriptors.
    ///
    /// Boundary lines are recomputed only for entities whose geometry
    /// changed (exact comparison of x/y/width/height). Routing points are
    /// rebuilt from scratch for every entity on every update, changed or
    /// not; that conservative rebuild is part of the contract. Entities
    /// absent from `descriptors` are removed.
    ///
    /// Returns the number of entities considered mutated, removals included.
    pub fn update_from_entity_descriptors(
        &mut self,
        descriptors: &[EntityDescriptor],
        grid_size: f64,
    ) -> usize {
        let mut mutated = 0usize;

        let stale: Vec<String> = self
            .entities
            .keys()
            .filter(|id| !descriptors.iter().any(|d| &d.id == *id))
            .cloned()
            .collect();
        for id in stale {
            self.entities.remove(&id);
            mutated += 1;
        }

        for descriptor in descriptors {
            let geometry_changed = match self.entities.get(&descriptor.id) {
                Some(outline) => {
                    outline.x != descriptor.x
                        || outline.y != descriptor.y
                        || outline.width != descriptor.width
                        || outline.height != descriptor.height
                }
                None => true,
            };
            if geometry_changed {
                mutated += 1;
            }

            let (boundary_lines, extent) = if geometry_changed {
                boundary_lines_of(descriptor)
            } else {
                // Unchanged geometry keeps its boundary lines; the node
                // rebuild below still happens unconditionally.
                match self.entities.get(&descriptor.id) {
                    Some(outline) => (outline.boundary_lines.clone(), outline.extent),
                    None => boundary_lines_of(descriptor),
                }
            };

            let accessible =
                find_accessible_routing_points(std::slice::from_ref(descriptor), descriptors);
            let mut points = accessible.points;
            for corner in descriptor.bounding_rect().points_scaled_to_grid(grid_size) {
                points.push(corner);
            }

            self.entities.insert(
                descriptor.id.clone(),
                EntityOutline {
                    x: descriptor.x,
                    y: descriptor.y,
                    width: descriptor.width,
                    height: descriptor.height,
                    boundary_lines,
                    extent,
                    nodes: points.iter().map(|p| RoutingPointNode::new(*p)).collect(),
                },
            );
        }

        if mutated > 0 {
            self.invalidate_all();
        }
        mutated
    }

    pub fn routing_point_count(&self) -> usize {
        self.entities.values().map(|outline| outline.nodes.len()).sum()
    }

    pub fn boundary_line_count(&self) -> usize {
        self.entities
            .values()
            .map(|outline| outline.boundary_lines.count())
            .sum()
    }

    /// Whether any boundary segment crosses `line`. A zero-length line (a
    /// point queried against itself) is never blocked.
    pub fn is_line_blocked(&self, line: &Line) -> bool {
        if !(line.length() > 0.0) {
            return false;
        }
        let (min_x, max_x) = (line.min_x(), line.max_x());
        let (min_y, max_y) = (line.min_y(), line.max_y());
        for outline in self.entities.values() {
            // Broad phase: skip entities whose outline box misses the
            // candidate line's box entirely.
            if outline.extent.right < min_x
                || outline.extent.left > max_x
                || outline.extent.bottom < min_y
                || outline.extent.top > max_y
            {
                continue;
            }
            for boundary in outline.boundary_lines.iter() {
                if line.intersects_segment(boundary) {
                    return true;
                }
            }
        }
        false
    }

    /// The nearest routing point with an unobstructed sight line to
    /// `origin`, or `None` when every sight line is blocked.
    pub fn find_visible_point_closest_to(&self, origin: Point) -> Option<Point> {
        let mut best: Option<(f64, Point)> = None;
        for outline in self.entities.values() {
            for node in &outline.nodes {
                let sight = Line::new(origin, node.point);
                let distance = sight.length();
                if let Some((best_distance, _)) = best
                    && distance >= best_distance
                {
                    continue;
                }
                if self.is_line_blocked(&sight) {
                    continue;
                }
                best = Some((distance, node.point));
            }
        }
        best.map(|(_, point)| point)
    }

    /// Greedy best-first search from the routing point nearest `start`
    /// toward `end`, walking mutually visible points and minimizing
    /// accumulated length plus straight-line distance to `end`.
    ///
    /// Returns the waypoints in travel order; empty when start has no
    /// visible routing point or the endpoint is unreachable from where the
    /// search stops. The caller appends the actual start/end points itself.
    pub fn compute_route(&mut self, start: Point, end: Point, optimize: bool) -> PointSet {
        let Some(first) = self.find_visible_point_closest_to(start) else {
            return PointSet::new();
        };

        let mut route: Vec<Point> = vec![first];
        let mut route_length = 0.0;
        let mut current = first;

        while Line::new(current, end).length() >= ROUTE_ARRIVAL_THRESHOLD_PX {
            match self.next_route_point(route_length, &route, current, end) {
                Some(next) => {
                    route_length += Line::new(current, next).length();
                    route.push(next);
                    current = next;
                }
                None => {
                    // Candidates exhausted: the route stands only if the
                    // endpoint is reachable from where the search stopped.
                    if self.is_line_blocked(&Line::new(current, end)) {
                        return PointSet::new();
                    }
                    break;
                }
            }
        }

        if optimize {
            optimize_route(&mut route, |a, b| !self.is_line_blocked(&Line::new(a, b)));
        }
        route.into_iter().collect()
    }

    /// The cheapest continuation from `current`: among its visible points
    /// not already routed, the one minimizing g(n) + h(n) with Euclidean h.
    /// Cost ties keep the earliest point in map order, keeping routes
    /// stable across runs.
    fn next_route_point(
        &mut self,
        route_length: f64,
        route: &[Point],
        current: Point,
        end: Point,
    ) -> Option<Point> {
        let mut best: Option<(f64, Point)> = None;
        for candidate in self.visible_points_of(current) {
            if route.contains(&candidate) {
                continue;
            }
            let g = route_length + Line::new(current, candidate).length();
            let h = Line::new(candidate, end).length();
            match best {
                Some((best_cost, _)) if g + h >= best_cost => {}
                _ => best = Some((g + h, candidate)),
            }
        }
        best.map(|(_, point)| point)
    }

    fn visible_points_of(&mut self, point: Point) -> Vec<Point> {
        for outline in self.entities.values() {
            for node in &outline.nodes {
                if node.point == point && node.valid {
                    return node.visible.clone();
                }
            }
        }
        let computed = self.compute_visible_points(point);
        self.store_visible_points(point, &computed);
        computed
    }

    fn compute_visible_points(&self, origin: Point) -> Vec<Point> {
        let mut visible: Vec<Point> = Vec::new();
        for outline in self.entities.values() {
            for node in &outline.nodes {
                if node.point == origin || visible.contains(&node.point) {
                    continue;
                }
                if !self.is_line_blocked(&Line::new(origin, node.point)) {
                    visible.push(node.point);
                }
            }
        }
        visible
    }

    fn store_visible_points(&mut self, point: Point, visible: &[Point]) {
        for outline in self.entities.values_mut() {
            for node in &mut outline.nodes {
                if node.point == point {
                    node.visible = visible.to_vec();
                    node.valid = true;
                }
            }
        }
    }

    fn invalidate_all(&mut self) {
        for outline in self.entities.values_mut() {
            for node in &mut outline.nodes {
                node.valid = false;
                node.visible.clear();
            }
        }
    }
}

fn boundary_lines_of(descriptor: &EntityDescriptor) -> (LineSet, Rectangle) {
    let mut lines = LineSet::new();
    let entity_rect = descriptor.bounding_rect();
    for edge in entity_rect.edges() {
        lines.push(edge);
    }
    let mut extent = entity_rect;
    for anchor in &descriptor.connector_anchors {
        let anchor_rect = anchor.bounding_rect();
        for edge in anchor_rect.edges() {
            lines.push(edge);
        }
        extent = Rectangle::new(
            extent.left.min(anchor_rect.left),
            extent.top.min(anchor_rect.top),
            extent.right.max(anchor_rect.right),
            extent.bottom.max(anchor_rect.bottom),
        );
    }
    (lines, extent)
}

fn extent_of(lines: &LineSet) -> Option<Rectangle> {
    let mut bounds: Option<Rectangle> = None;
    for line in lines.iter() {
        let next = match bounds {
            Some(rect) => Rectangle::new(
                rect.left.min(line.min_x()),
                rect.top.min(line.min_y()),
                rect.right.max(line.max_x()),
                rect.bottom.max(line.max_y()),
            ),
            None => Rectangle::new(line.min_x(), line.min_y(), line.max_x(), line.max_y()),
        };
        bounds = Some(next);
    }
    bounds
}
