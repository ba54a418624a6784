use crate::config::Config;
use crate::graph::Graph;
use crate::layout::Layout;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serializable snapshot of a laid-out, styled graph. Doubles as the `json`
/// CLI output and the data payload the generated page draws from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub background: String,
    pub font_family: String,
    pub font_size: f32,
    pub line_color: String,
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: String,
    pub text_color: String,
    pub stroke: String,
    pub description: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneEdge {
    pub from: String,
    pub to: String,
    pub points: Vec<[f32; 2]>,
}

impl Scene {
    pub fn from_layout(layout: &Layout, graph: &Graph, config: &Config) -> Self {
        let mut nodes = Vec::with_capacity(layout.nodes.len());
        for node in layout.nodes.values() {
            let Some(styled) = graph.nodes.get(&node.name) else {
                continue;
            };
            nodes.push(SceneNode {
                name: styled.name.clone(),
                label: styled.label.clone(),
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
                fill: styled.fill.clone(),
                text_color: styled.text_color.clone(),
                stroke: styled.stroke.clone(),
                description: styled.description.clone(),
                tooltip: styled.tooltip.clone(),
            });
        }
        nodes.sort_by_key(|node| {
            graph
                .nodes
                .get(&node.name)
                .map(|styled| styled.order)
                .unwrap_or(usize::MAX)
        });

        let edges = layout
            .edges
            .iter()
            .map(|edge| SceneEdge {
                from: edge.from.clone(),
                to: edge.to.clone(),
                points: edge.points.iter().map(|(x, y)| [*x, *y]).collect(),
            })
            .collect();

        Scene {
            width: layout.width,
            height: layout.height,
            background: config.render.background.clone(),
            font_family: config.theme.font_family.clone(),
            font_size: config.theme.font_size,
            line_color: config.theme.line_color.clone(),
            nodes,
            edges,
        }
    }
}

pub fn write_scene_json(scene: &Scene, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, scene)?;
        }
        None => {
            println!("{}", serde_json::to_string_pretty(scene)?);
        }
    }
    Ok(())
}
