#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod protocol;
pub mod render;
pub mod route;
pub mod theme;
pub mod worker;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, EngineConfig, RenderConfig, load_config};
pub use engine::RoutingEngine;
pub use geometry::{Line, LineIntersection, LineSet, Point, PointSet, Rectangle};
pub use protocol::{
    ConnectorAnchorDescriptor, ConnectorDescriptor, EntityDescriptor, RouteMetrics,
    RoutingAlgorithm, RoutingReply, RoutingRequest,
};
pub use render::{render_scene_svg, write_output_svg};
pub use route::{PointVisibilityMap, RouteError};
pub use theme::Theme;
pub use worker::RoutingWorker;
