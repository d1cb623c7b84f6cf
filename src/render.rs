use crate::config::RenderConfig;
use crate::protocol::{RoutingReply, RoutingRequest};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Render a routed scene as a standalone SVG document: entity boxes, their
/// connector anchors, and the routed connector paths. Intended for CLI
/// output and debugging; the engine itself only ever emits path strings.
pub fn render_scene_svg(
    request: &RoutingRequest,
    reply: &RoutingReply,
    theme: &Theme,
    config: &RenderConfig,
) -> String {
    let (min_x, min_y, width, height) = scene_bounds(request, reply, config.padding);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width:.2}\" height=\"{height:.2}\" viewBox=\"{min_x:.2} {min_y:.2} {width:.2} {height:.2}\">",
    ));

    svg.push_str(&format!(
        "<rect x=\"{min_x:.2}\" y=\"{min_y:.2}\" width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"arrow\" viewBox=\"0 0 10 10\" refX=\"10\" refY=\"5\" markerWidth=\"6\" markerHeight=\"6\" orient=\"auto-start-reverse\"><path d=\"M 0 0 L 10 5 L 0 10 z\" fill=\"{}\"/></marker>",
        theme.connector_color
    ));
    svg.push_str("</defs>");

    for connector in &reply.connector_descriptors {
        let Some(path) = connector.svg_path.as_deref() else {
            continue;
        };
        let marker_start = if connector.marker_start_size > 0.0 {
            "marker-start=\"url(#arrow)\" "
        } else {
            ""
        };
        let marker_end = if connector.marker_end_size > 0.0 {
            "marker-end=\"url(#arrow)\" "
        } else {
            ""
        };
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.4\" {}{}/>",
            path, theme.connector_color, marker_start, marker_end
        ));

        if config.show_waypoints
            && let Some(buffer) = &connector.points_in_path
        {
            for pair in buffer.chunks_exact(2) {
                svg.push_str(&format!(
                    "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"2\" fill=\"{}\"/>",
                    pair[0], pair[1], theme.waypoint_color
                ));
            }
        }
    }

    for entity in &request.entity_descriptors {
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"6\" ry=\"6\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
            entity.x, entity.y, entity.width, entity.height, theme.entity_fill, theme.entity_border
        ));
        let center_x = entity.x + entity.width / 2.0;
        let center_y = entity.y + entity.height / 2.0;
        svg.push_str(&format!(
            "<text x=\"{center_x:.2}\" y=\"{center_y:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            theme.font_family,
            theme.font_size,
            theme.entity_text_color,
            escape_xml(&entity.id)
        ));

        if config.show_anchors {
            for anchor in &entity.connector_anchors {
                svg.push_str(&format!(
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
                    anchor.x, anchor.y, anchor.width, anchor.height, theme.anchor_fill, theme.anchor_border
                ));
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

fn scene_bounds(request: &RoutingRequest, reply: &RoutingReply, padding: f64) -> (f64, f64, f64, f64) {
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;

    for entity in &request.entity_descriptors {
        min_x = min_x.min(entity.x);
        min_y = min_y.min(entity.y);
        max_x = max_x.max(entity.x + entity.width);
        max_y = max_y.max(entity.y + entity.height);
    }
    for connector in &reply.connector_descriptors {
        if let Some(buffer) = &connector.points_in_path {
            for pair in buffer.chunks_exact(2) {
                min_x = min_x.min(pair[0]);
                min_y = min_y.min(pair[1]);
                max_x = max_x.max(pair[0]);
                max_y = max_y.max(pair[1]);
            }
        }
    }

    if min_x > max_x {
        // Empty scene; emit a small blank canvas.
        return (0.0, 0.0, 200.0, 200.0);
    }
    (
        min_x - padding,
        min_y - padding,
        (max_x - min_x) + padding * 2.0,
        (max_y - min_y) + padding * 2.0,
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, config: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(config.width, config.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RoutingEngine;
    use crate::protocol::{
        ConnectorAnchorDescriptor, ConnectorDescriptor, EntityDescriptor, RoutingAlgorithm,
    };

    fn sample_request() -> RoutingRequest {
        RoutingRequest {
            grid_size: 10.0,
            connector_descriptors: vec![ConnectorDescriptor {
                id: "c1".to_string(),
                anchor_start_centroid_arr: [10.0, 50.0],
                anchor_end_centroid_arr: [90.0, 50.0],
                marker_start_size: 0.0,
                marker_end_size: 4.0,
                curvature_px: 0.0,
                routing_algorithm: RoutingAlgorithm::AStarWithRouteOptimization,
                svg_path: None,
                points_in_path: None,
            }],
            entity_descriptors: vec![EntityDescriptor {
                id: "box & label".to_string(),
                x: 0.0,
                y: 40.0,
                width: 20.0,
                height: 20.0,
                connector_anchors: vec![ConnectorAnchorDescriptor {
                    id: "a1".to_string(),
                    x: 9.0,
                    y: 49.0,
                    width: 2.0,
                    height: 2.0,
                    routing_points_float64_arr: vec![25.0, 50.0],
                }],
            }],
        }
    }

    #[test]
    fn scene_svg_contains_entities_and_paths() {
        let request = sample_request();
        let mut engine = RoutingEngine::new();
        let reply = engine.process_request(request.clone()).unwrap();
        let svg = render_scene_svg(&request, &reply, &Theme::modern(), &RenderConfig::default());
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains("<path d=\"M"));
        assert!(svg.contains("marker-end"));
        // Entity labels are XML-escaped.
        assert!(svg.contains("box &amp; label"));
    }

    #[test]
    fn empty_scene_still_renders_a_canvas() {
        let request = RoutingRequest {
            grid_size: 10.0,
            connector_descriptors: vec![],
            entity_descriptors: vec![],
        };
        let mut engine = RoutingEngine::new();
        let reply = engine.process_request(request.clone()).unwrap();
        let svg = render_scene_svg(&request, &reply, &Theme::blueprint(), &RenderConfig::default());
        assert!(svg.contains("<svg"));
    }
}
