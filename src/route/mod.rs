mod accessible;
mod connector;
mod optimizer;
mod path_builder;
mod visibility;

pub use accessible::{AccessibleRoutingPoints, find_accessible_routing_points};
pub use connector::{ComputedConnectorPath, compute_connector_path};
pub use optimizer::optimize_route;
pub use path_builder::points_to_path;
pub use visibility::PointVisibilityMap;

use thiserror::Error;

/// Errors surfaced by connector routing. Unroutable geometry is not an
/// error: it degrades to a straight centroid-to-centroid path. These cover
/// caller configuration bugs, which must fail loudly rather than fall back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("unknown routing algorithm value {0}")]
    UnknownAlgorithm(u8),
    #[error("routing algorithm {0} is not supported by the routing engine")]
    UnsupportedAlgorithm(u8),
}
