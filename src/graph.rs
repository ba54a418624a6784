use std::collections::BTreeMap;

use crate::config::InteractionConfig;
use crate::document::{Document, DocumentError, NodeDescriptor, UNEVALUATED};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass {
    Input,
    Output,
    Evaluated,
    Unevaluated,
}

impl NodeClass {
    pub fn fill<'a>(self, theme: &'a Theme) -> &'a str {
        match self {
            Self::Input => &theme.input_fill,
            Self::Output => &theme.output_fill,
            Self::Evaluated => &theme.evaluated_fill,
            Self::Unevaluated => &theme.unevaluated_fill,
        }
    }

    pub fn text_color<'a>(self, theme: &'a Theme) -> &'a str {
        match self {
            Self::Input => &theme.input_text,
            Self::Output => &theme.output_text,
            Self::Evaluated => &theme.evaluated_text,
            Self::Unevaluated => &theme.unevaluated_text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arrowhead {
    #[default]
    Vee,
}

impl Arrowhead {
    pub fn marker_id(self) -> &'static str {
        match self {
            Self::Vee => "vee",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StyledNode {
    pub name: String,
    pub label: String,
    pub class: NodeClass,
    pub fill: String,
    pub text_color: String,
    pub stroke: String,
    pub description: String,
    pub tooltip: String,
    pub order: usize,
}

#[derive(Debug, Clone)]
pub struct StyledEdge {
    pub from: String,
    pub to: String,
    pub arrowhead: Arrowhead,
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: BTreeMap<String, StyledNode>,
    pub edges: Vec<StyledEdge>,
}

impl Graph {
    /// Nodes in document order, the order the layout engine sees them in.
    pub fn ordered_nodes(&self) -> Vec<&StyledNode> {
        let mut nodes: Vec<&StyledNode> = self.nodes.values().collect();
        nodes.sort_by_key(|node| node.order);
        nodes
    }
}

/// Classification priority: input beats output beats evaluated. A node with
/// no meaningful `type` is evaluated unless its value is still the
/// `"unevaluated"` sentinel.
pub fn classify(descriptor: &NodeDescriptor) -> NodeClass {
    match descriptor.kind.as_deref() {
        Some("input") => NodeClass::Input,
        Some("output") => NodeClass::Output,
        _ => {
            if descriptor.value.as_str() == Some(UNEVALUATED) {
                NodeClass::Unevaluated
            } else {
                NodeClass::Evaluated
            }
        }
    }
}

/// Shortens generated names at the `"__"` marker: keeps the text through the
/// 10th character past the marker start and appends `"..."`. Names without
/// the marker pass through unchanged.
pub fn simplify_label(name: &str) -> String {
    let Some(marker) = name.find("__") else {
        return name.to_string();
    };
    let keep = name[..marker].chars().count() + 11;
    let mut label: String = name.chars().take(keep).collect();
    label.push_str("...");
    label
}

pub fn describe_value(value: &serde_json::Value) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn clip_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

pub fn build_graph(
    document: &Document,
    theme: &Theme,
    interaction: &InteractionConfig,
) -> Result<Graph, DocumentError> {
    let mut graph = Graph::default();

    for (index, descriptor) in document.nodes.iter().enumerate() {
        if descriptor.name.trim().is_empty() {
            return Err(DocumentError::EmptyName { index });
        }
        if graph.nodes.contains_key(&descriptor.name) {
            return Err(DocumentError::DuplicateNode(descriptor.name.clone()));
        }
        let class = classify(descriptor);
        let description = describe_value(&descriptor.value)?;
        let tooltip = clip_text(&description, interaction.tooltip_max_chars);
        graph.nodes.insert(
            descriptor.name.clone(),
            StyledNode {
                name: descriptor.name.clone(),
                label: simplify_label(&descriptor.name),
                class,
                fill: class.fill(theme).to_string(),
                text_color: class.text_color(theme).to_string(),
                stroke: class.text_color(theme).to_string(),
                description,
                tooltip,
                order: index,
            },
        );
    }

    for edge in &document.edges {
        for endpoint in [&edge.0, &edge.1] {
            if !graph.nodes.contains_key(endpoint.as_str()) {
                return Err(DocumentError::DanglingEdge {
                    from: edge.0.clone(),
                    to: edge.1.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
        graph.edges.push(StyledEdge {
            from: edge.0.clone(),
            to: edge.1.clone(),
            arrowhead: Arrowhead::Vee,
        });
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;
    use serde_json::json;

    fn descriptor(name: &str, kind: Option<&str>, value: serde_json::Value) -> NodeDescriptor {
        let raw = json!({ "name": name, "type": kind, "value": value });
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn input_type_wins_over_value_state() {
        let node = descriptor("a", Some("input"), json!([1, 2, 3]));
        assert_eq!(classify(&node), NodeClass::Input);
        let node = descriptor("a", Some("input"), json!("unevaluated"));
        assert_eq!(classify(&node), NodeClass::Input);
    }

    #[test]
    fn output_type_wins_over_value_state() {
        let node = descriptor("z", Some("output"), json!("unevaluated"));
        assert_eq!(classify(&node), NodeClass::Output);
    }

    #[test]
    fn untyped_nodes_classify_by_value() {
        assert_eq!(
            classify(&descriptor("n", None, json!("unevaluated"))),
            NodeClass::Unevaluated
        );
        assert_eq!(classify(&descriptor("n", None, json!(42))), NodeClass::Evaluated);
        assert_eq!(
            classify(&descriptor("n", Some("hidden"), json!("unevaluated"))),
            NodeClass::Unevaluated
        );
    }

    #[test]
    fn sentinel_must_match_exactly() {
        assert_eq!(
            classify(&descriptor("n", None, json!("Unevaluated"))),
            NodeClass::Evaluated
        );
        assert_eq!(
            classify(&descriptor("n", None, json!({"state": "unevaluated"}))),
            NodeClass::Evaluated
        );
    }

    #[test]
    fn classic_palette_per_class() {
        let theme = Theme::classic();
        assert_eq!(NodeClass::Input.fill(&theme), "#333");
        assert_eq!(NodeClass::Input.text_color(&theme), "white");
        assert_eq!(NodeClass::Output.fill(&theme), "#008080");
        assert_eq!(NodeClass::Output.text_color(&theme), "white");
        assert_eq!(NodeClass::Evaluated.fill(&theme), "#ccc");
        assert_eq!(NodeClass::Evaluated.text_color(&theme), "#333");
        assert_eq!(NodeClass::Unevaluated.fill(&theme), "white");
        assert_eq!(NodeClass::Unevaluated.text_color(&theme), "#333");
    }

    #[test]
    fn simplify_keeps_marker_window() {
        assert_eq!(simplify_label("a__bcdefghij_rest"), "a__bcdefghij...");
        assert_eq!(simplify_label("plainname"), "plainname");
    }

    #[test]
    fn simplify_short_tails_still_get_ellipsis() {
        assert_eq!(simplify_label("x__ab"), "x__ab...");
    }

    #[test]
    fn simplify_is_char_based() {
        assert_eq!(simplify_label("αβ__γδεζηθικλμ_rest"), "αβ__γδεζηθικλ...");
    }

    #[test]
    fn descriptions_are_pretty_printed() {
        let value = json!({"a": 1, "b": [true, null]});
        let description = describe_value(&value).unwrap();
        assert!(description.contains("\n  \"a\": 1"));
        assert_eq!(describe_value(&json!("unevaluated")).unwrap(), "\"unevaluated\"");
    }

    #[test]
    fn tooltip_clips_to_exact_length() {
        let long = "x".repeat(800);
        let clipped = clip_text(&long, 500);
        assert_eq!(clipped.chars().count(), 500);
        assert_eq!(clip_text("short", 500), "short");
    }

    fn build(input: &str) -> Result<Graph, DocumentError> {
        let document = parse_document(input).unwrap();
        build_graph(&document, &Theme::classic(), &InteractionConfig::default())
    }

    #[test]
    fn builder_resolves_styles() {
        let graph = build(
            r#"{
                "nodes": [
                    {"name": "src__alonggeneratedname_7", "type": "input", "value": "unevaluated"},
                    {"name": "mid", "value": {"rows": 3}},
                    {"name": "out", "type": "output", "value": "unevaluated"}
                ],
                "edges": [["src__alonggeneratedname_7", "mid"], ["mid", "out"]]
            }"#,
        )
        .unwrap();

        let src = &graph.nodes["src__alonggeneratedname_7"];
        assert_eq!(src.label, "src__alonggene...");
        assert_eq!(src.fill, "#333");
        assert_eq!(src.text_color, "white");
        assert_eq!(src.stroke, "white");

        let mid = &graph.nodes["mid"];
        assert_eq!(mid.label, "mid");
        assert_eq!(mid.fill, "#ccc");
        assert_eq!(mid.description, "{\n  \"rows\": 3\n}");
        assert_eq!(mid.tooltip, mid.description);

        let out = &graph.nodes["out"];
        assert_eq!(out.fill, "#008080");

        assert_eq!(graph.edges.len(), 2);
        assert!(graph.edges.iter().all(|e| e.arrowhead == Arrowhead::Vee));
    }

    #[test]
    fn builder_orders_nodes_by_document_position() {
        let graph = build(
            r#"{
                "nodes": [
                    {"name": "z", "value": 1},
                    {"name": "a", "value": 2}
                ],
                "edges": [["z", "a"]]
            }"#,
        )
        .unwrap();
        let ordered: Vec<&str> = graph.ordered_nodes().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(ordered, ["z", "a"]);
    }

    #[test]
    fn dangling_edge_is_an_error() {
        let err = build(
            r#"{
                "nodes": [{"name": "a", "value": 1}],
                "edges": [["a", "ghost"]]
            }"#,
        )
        .unwrap_err();
        match err {
            DocumentError::DanglingEdge { from, to, missing } => {
                assert_eq!(from, "a");
                assert_eq!(to, "ghost");
                assert_eq!(missing, "ghost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = build(
            r#"{
                "nodes": [
                    {"name": "a", "value": 1},
                    {"name": "a", "value": 2}
                ],
                "edges": []
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, DocumentError::DuplicateNode(name) if name == "a"));
    }

    #[test]
    fn empty_names_are_rejected() {
        let err = build(
            r#"{
                "nodes": [{"name": "  ", "value": 1}],
                "edges": []
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, DocumentError::EmptyName { index: 0 }));
    }
}
