use crate::config::RenderConfig;
use crate::graph::Graph;
use crate::layout::{Layout, TextBlock};
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Dagre-d3's vee arrowhead, the marker the original viewer asked for on
/// every edge.
pub const VEE_MARKER_PATH: &str = "M 0 0 L 10 5 L 0 10 L 4 5 z";

pub fn render_svg(layout: &Layout, graph: &Graph, theme: &Theme, render: &RenderConfig) -> String {
    let width = render.width.max(200.0);
    let height = render.height.max(200.0);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        render.background
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        "<marker id=\"vee\" viewBox=\"0 0 10 10\" refX=\"9\" refY=\"5\" markerWidth=\"8\" markerHeight=\"6\" orient=\"auto\"><path d=\"{VEE_MARKER_PATH}\" fill=\"{}\"/></marker>",
        theme.line_color
    ));
    svg.push_str("</defs>");

    let translate_x = (width - layout.width) / 2.0;
    let translate_y = (height - layout.height) / 2.0;
    svg.push_str(&format!(
        "<g transform=\"translate({translate_x:.2},{translate_y:.2})\">"
    ));

    for (edge, styled) in layout.edges.iter().zip(&graph.edges) {
        let d = points_to_path(&edge.points);
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.4\" marker-end=\"url(#{})\"/>",
            d,
            theme.line_color,
            styled.arrowhead.marker_id()
        ));
    }

    for node in layout.nodes.values() {
        let Some(styled) = graph.nodes.get(&node.name) else {
            continue;
        };
        svg.push_str("<g>");
        svg.push_str(&format!("<title>{}</title>", escape_xml(&styled.tooltip)));
        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"5\" ry=\"5\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.4\"/>",
            node.x, node.y, node.width, node.height, styled.fill, styled.stroke
        ));
        let center_x = node.x + node.width / 2.0;
        let center_y = node.y + node.height / 2.0;
        svg.push_str(&text_block_svg(
            center_x,
            center_y,
            &node.label,
            &styled.text_color,
            theme,
        ));
        svg.push_str("</g>");
    }

    svg.push_str("</g>");
    svg.push_str("</svg>");
    svg
}

fn points_to_path(points: &[(f32, f32)]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut d = String::new();
    d.push_str(&format!("M {:.2} {:.2}", points[0].0, points[0].1));
    for point in points.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", point.0, point.1));
    }
    d
}

fn text_block_svg(x: f32, y: f32, label: &TextBlock, fill: &str, theme: &Theme) -> String {
    let line_height = theme.font_size * 1.4;
    let total_height = label.lines.len() as f32 * line_height;
    let start_y = y - total_height / 2.0 + theme.font_size;

    let mut text = String::new();
    text.push_str(&format!(
        "<text x=\"{x:.2}\" y=\"{start_y:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">",
        escape_xml(&theme.font_family),
        theme.font_size,
        fill
    ));
    for (idx, line) in label.lines.iter().enumerate() {
        let dy = if idx == 0 { 0.0 } else { line_height };
        text.push_str(&format!(
            "<tspan x=\"{x:.2}\" dy=\"{dy:.2}\">{}</tspan>",
            escape_xml(line)
        ));
    }
    text.push_str("</text>");
    text
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    write_output_text(svg, output)
}

pub fn write_output_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
        }
        None => {
            print!("{}", text);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.default_size = usvg::Size::from_wh(render.width, render.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

pub(crate) fn escape_xml(input: &str) -> String {
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
    use crate::config::{Config, InteractionConfig};
    use crate::document::parse_document;
    use crate::graph::build_graph;
    use crate::layout::compute_layout;

    fn render(input: &str) -> String {
        let config = Config::default();
        let document = parse_document(input).expect("parse failed");
        let graph = build_graph(&document, &config.theme, &InteractionConfig::default())
            .expect("build failed");
        let layout = compute_layout(&graph, &config.theme, &config.layout);
        render_svg(&layout, &graph, &config.theme, &config.render)
    }

    #[test]
    fn one_vee_arrow_per_edge() {
        let svg = render(
            r#"{
                "nodes": [
                    {"name": "a", "type": "input", "value": "unevaluated"},
                    {"name": "b", "value": 2},
                    {"name": "c", "type": "output", "value": "unevaluated"}
                ],
                "edges": [["a", "b"], ["b", "c"]]
            }"#,
        );
        assert_eq!(svg.matches("marker-end=\"url(#vee)\"").count(), 2);
        assert_eq!(svg.matches(VEE_MARKER_PATH).count(), 1);
    }

    #[test]
    fn nodes_carry_class_colors_and_tooltips() {
        let svg = render(
            r#"{
                "nodes": [
                    {"name": "src", "type": "input", "value": "unevaluated"},
                    {"name": "mid", "value": {"rows": 3}}
                ],
                "edges": [["src", "mid"]]
            }"#,
        );
        assert!(svg.contains("fill=\"#333\""));
        assert!(svg.contains("fill=\"#ccc\""));
        assert!(svg.contains("rx=\"5\""));
        assert!(svg.contains("<title>"));
        assert!(svg.contains("&quot;rows&quot;: 3"));
    }

    #[test]
    fn diagram_is_centered_in_the_viewport() {
        let config = Config::default();
        let document =
            parse_document(r#"{"nodes": [{"name": "a", "value": 1}], "edges": []}"#).unwrap();
        let graph =
            build_graph(&document, &config.theme, &InteractionConfig::default()).unwrap();
        let layout = compute_layout(&graph, &config.theme, &config.layout);
        let svg = render_svg(&layout, &graph, &config.theme, &config.render);
        let expected = format!(
            "<g transform=\"translate({:.2},{:.2})\">",
            (config.render.width - layout.width) / 2.0,
            (config.render.height - layout.height) / 2.0
        );
        assert!(svg.contains(&expected), "missing centering group: {expected}");
    }

    #[test]
    fn empty_graph_renders_valid_svg() {
        let svg = render(r#"{"nodes": [], "edges": []}"#);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(!svg.contains("<rect x="));
    }

    #[test]
    fn labels_are_xml_escaped() {
        let svg = render(
            r#"{"nodes": [{"name": "a<b>&c", "value": 1}], "edges": []}"#,
        );
        assert!(svg.contains("a&lt;b&gt;&amp;c"));
        assert!(!svg.contains("a<b>"));
    }
}
